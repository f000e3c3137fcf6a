//! Companion price list: flat retail and bulk prices keyed by product name.
//!
//! Shares the catalog boundary but is not consumed by the scaling engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPrice {
    /// Product or formulation name, matched exactly.
    pub product: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk: Option<f64>,
}

impl ProductPrice {
    pub fn new(product: impl Into<String>, retail: Option<f64>, bulk: Option<f64>) -> Self {
        Self {
            product: product.into(),
            retail,
            bulk,
        }
    }
}
