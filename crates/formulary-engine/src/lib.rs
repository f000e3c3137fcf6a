//! Formulation scaling and cost-aggregation engine.
//!
//! Every operation here is a pure function of its inputs: formulations are
//! read from a [`formulary_core::catalog::FormulationSource`] and results are
//! freshly constructed values owned by the caller. Nothing is cached.
//!
//! - [`scale`] rescales a recipe linearly to a requested yield.
//! - [`cost`] derives per-unit and per-pack costs from a scaled recipe.
//! - [`indent`] merges scaled ingredient demand across many recipes.
//! - [`display`] holds the numeric display policy shared by reports.

pub mod cost;
pub mod display;
pub mod error;
pub mod indent;
pub mod scale;

pub use error::{EngineError, Result};
