//! The formulation repository.
//!
//! [`Catalog`] is built once at startup from already-parsed records and then
//! passed by reference to every consumer. Consumers that only need lookups
//! depend on the [`FormulationSource`] trait so that fixtures can be
//! substituted in tests.

use std::collections::HashMap;

use crate::formulation::Formulation;
use crate::price::ProductPrice;
use crate::validation::{self, ValidationError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The catalog file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A formulation record failed validation.
    #[error("invalid formulation '{formulation}': {source}")]
    Invalid {
        /// Slug (or id when the slug is empty) of the rejected record.
        formulation: String,
        source: ValidationError,
    },

    /// A price list entry failed validation.
    #[error("invalid price entry: {0}")]
    InvalidPrice(ValidationError),

    /// Two formulations share an id.
    #[error("duplicate formulation id {0}")]
    DuplicateId(u32),

    /// Two formulations share a slug.
    #[error("duplicate formulation slug '{0}'")]
    DuplicateSlug(String),

    /// No catalog file could be located.
    #[error("catalog '{0}' not found (searched the current directory and .formulary/)")]
    NotFound(String),
}

/// Convenience alias used throughout the catalog code.
pub type Result<T> = std::result::Result<T, CatalogError>;

// ---------------------------------------------------------------------------
// Lookup trait
// ---------------------------------------------------------------------------

/// Read-only access to formulation records.
pub trait FormulationSource {
    /// Looks up a formulation by id.
    fn get(&self, id: u32) -> Option<&Formulation>;

    /// Looks up a formulation by slug.
    fn get_by_slug(&self, slug: &str) -> Option<&Formulation>;

    /// All formulations in catalog order.
    fn formulations(&self) -> &[Formulation];
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// An immutable, validated collection of formulations plus the companion
/// price list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    formulations: Vec<Formulation>,
    by_id: HashMap<u32, usize>,
    by_slug: HashMap<String, usize>,
    prices: Vec<ProductPrice>,
    price_by_product: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, validating every record and indexing it by id, slug
    /// and price product name.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid record or on a duplicate id or slug. No
    /// partially-built catalog is returned.
    pub fn new(formulations: Vec<Formulation>, prices: Vec<ProductPrice>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(formulations.len());
        let mut by_slug = HashMap::with_capacity(formulations.len());

        for (idx, f) in formulations.iter().enumerate() {
            validation::validate(f).map_err(|source| CatalogError::Invalid {
                formulation: if f.slug.is_empty() {
                    f.id.to_string()
                } else {
                    f.slug.clone()
                },
                source,
            })?;
            if by_id.insert(f.id, idx).is_some() {
                return Err(CatalogError::DuplicateId(f.id));
            }
            if by_slug.insert(f.slug.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateSlug(f.slug.clone()));
            }
        }

        let mut price_by_product = HashMap::with_capacity(prices.len());
        for (idx, p) in prices.iter().enumerate() {
            validation::validate_price(p).map_err(CatalogError::InvalidPrice)?;
            // Later duplicates win, matching a plain key-value table.
            price_by_product.insert(p.product.clone(), idx);
        }

        Ok(Self {
            formulations,
            by_id,
            by_slug,
            prices,
            price_by_product,
        })
    }

    /// Resolves a user-supplied key: numeric keys are ids, anything else is a
    /// slug. A numeric string that matches no id falls back to slug lookup.
    pub fn resolve(&self, key: &str) -> Option<&Formulation> {
        let key = key.trim();
        if let Ok(id) = key.parse::<u32>() {
            if let Some(f) = self.get(id) {
                return Some(f);
            }
        }
        self.get_by_slug(key)
    }

    /// Formulations whose category matches (case-insensitive).
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Formulation> {
        self.formulations
            .iter()
            .filter(move |f| f.category.eq_ignore_ascii_case(category))
    }

    /// Exact-name lookup in the price list.
    pub fn price_for(&self, product: &str) -> Option<&ProductPrice> {
        self.price_by_product
            .get(product)
            .map(|&idx| &self.prices[idx])
    }

    /// The full price list in file order.
    pub fn prices(&self) -> &[ProductPrice] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.formulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulations.is_empty()
    }
}

impl FormulationSource for Catalog {
    fn get(&self, id: u32) -> Option<&Formulation> {
        self.by_id.get(&id).map(|&idx| &self.formulations[idx])
    }

    fn get_by_slug(&self, slug: &str) -> Option<&Formulation> {
        self.by_slug.get(slug).map(|&idx| &self.formulations[idx])
    }

    fn formulations(&self) -> &[Formulation] {
        &self.formulations
    }
}
