//! Engine error types.

/// Errors that abort an engine call.
///
/// Business-level conditions (unknown ids, zero quantities, duplicate
/// ingredient keys) are resolved by policy and never surface here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The requested yield is NaN or infinite.
    #[error("requested yield must be a finite number (got {0})")]
    NonFiniteYield(f64),

    /// An indent request carries a NaN or infinite quantity.
    #[error("requested quantity for formulation {formulation_id} must be a finite number (got {quantity})")]
    NonFiniteQuantity { formulation_id: u32, quantity: f64 },
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
