//! Load-time validation rules for formulation and price records.
//!
//! The engine performs plain arithmetic and trusts its inputs, so anything
//! that would produce a division by zero or a non-finite result is rejected
//! here, before a record enters the catalog.

use std::collections::HashSet;

use crate::formulation::{Formulation, PackSize};
use crate::price::ProductPrice;

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("id must be a positive integer")]
    ZeroId,

    #[error("slug is required")]
    SlugRequired,

    #[error("slug '{0}' must contain only lowercase letters, digits and '-'")]
    InvalidSlug(String),

    #[error("name is required")]
    NameRequired,

    #[error("base yield must be a finite number greater than 0 (got {0})")]
    InvalidBaseYield(f64),

    #[error("manual total quantity must be a finite number greater than 0 (got {0})")]
    InvalidManualTotal(f64),

    #[error("at least one ingredient is required")]
    NoIngredients,

    #[error("ingredient line numbers must be positive")]
    ZeroLineNo,

    #[error("duplicate ingredient line number {0}")]
    DuplicateLineNo(u32),

    #[error("ingredient on line {0} has no name")]
    IngredientNameRequired(u32),

    #[error("ingredient on line {0} has no unit")]
    IngredientUnitRequired(u32),

    #[error("ingredient on line {line_no} has invalid quantity {value}")]
    InvalidQuantity { line_no: u32, value: f64 },

    #[error("ingredient on line {line_no} has invalid rate {value}")]
    InvalidRate { line_no: u32, value: f64 },

    #[error("packaging cost for {size} must be a finite non-negative number (got {value})")]
    InvalidPackagingCost { size: PackSize, value: f64 },

    #[error("price entry has no product name")]
    ProductRequired,

    #[error("{kind} price for '{product}' must be a finite non-negative number (got {value})")]
    InvalidPrice {
        product: String,
        kind: &'static str,
        value: f64,
    },
}

fn is_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn is_valid_slug(slug: &str) -> bool {
    slug.bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Validates a formulation record.
pub fn validate(formulation: &Formulation) -> Result<(), ValidationError> {
    if formulation.id == 0 {
        return Err(ValidationError::ZeroId);
    }
    if formulation.slug.is_empty() {
        return Err(ValidationError::SlugRequired);
    }
    if !is_valid_slug(&formulation.slug) {
        return Err(ValidationError::InvalidSlug(formulation.slug.clone()));
    }
    if formulation.name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if !formulation.base_yield.is_finite() || formulation.base_yield <= 0.0 {
        return Err(ValidationError::InvalidBaseYield(formulation.base_yield));
    }
    if let Some(total) = formulation.manual_total_quantity {
        if !total.is_finite() || total <= 0.0 {
            return Err(ValidationError::InvalidManualTotal(total));
        }
    }
    if formulation.ingredients.is_empty() {
        return Err(ValidationError::NoIngredients);
    }

    let mut seen_lines = HashSet::new();
    for ing in &formulation.ingredients {
        if ing.line_no == 0 {
            return Err(ValidationError::ZeroLineNo);
        }
        if !seen_lines.insert(ing.line_no) {
            return Err(ValidationError::DuplicateLineNo(ing.line_no));
        }
        if ing.name.is_empty() {
            return Err(ValidationError::IngredientNameRequired(ing.line_no));
        }
        if ing.unit.is_empty() {
            return Err(ValidationError::IngredientUnitRequired(ing.line_no));
        }
        if !is_non_negative(ing.quantity) {
            return Err(ValidationError::InvalidQuantity {
                line_no: ing.line_no,
                value: ing.quantity,
            });
        }
        if !is_non_negative(ing.rate) {
            return Err(ValidationError::InvalidRate {
                line_no: ing.line_no,
                value: ing.rate,
            });
        }
    }

    for size in PackSize::ALL {
        if let Some(cost) = formulation.packaging_cost(size) {
            if !is_non_negative(cost) {
                return Err(ValidationError::InvalidPackagingCost { size, value: cost });
            }
        }
    }

    Ok(())
}

/// Validates a price list entry.
pub fn validate_price(price: &ProductPrice) -> Result<(), ValidationError> {
    if price.product.trim().is_empty() {
        return Err(ValidationError::ProductRequired);
    }
    for (kind, value) in [("retail", price.retail), ("bulk", price.bulk)] {
        if let Some(v) = value {
            if !is_non_negative(v) {
                return Err(ValidationError::InvalidPrice {
                    product: price.product.clone(),
                    kind,
                    value: v,
                });
            }
        }
    }
    Ok(())
}
