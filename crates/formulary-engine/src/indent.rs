//! Indent aggregator: merge scaled ingredient demand across many production
//! runs into one procurement list.
//!
//! Each request is scaled on its own, with the formulation's nominal yield
//! (manual total when declared, else base yield) as the denominator, so a
//! requested quantity refers to the declared output. Ingredients are then
//! merged on their exact `(name, unit)` pair.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use formulary_core::catalog::FormulationSource;

use crate::error::{EngineError, Result};
use crate::scale::scale_to;

/// One planned production run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndentRequest {
    pub formulation_id: u32,
    pub quantity: f64,
}

impl IndentRequest {
    pub fn new(formulation_id: u32, quantity: f64) -> Self {
        Self {
            formulation_id,
            quantity,
        }
    }
}

/// One row of the procurement list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndentLine {
    pub name: String,
    pub unit: String,
    pub total_quantity: f64,

    /// Rate of the first contributor seen for this key.
    pub rate: f64,

    pub total_amount: f64,

    /// Slugs of contributing formulations, in encounter order.
    pub sources: Vec<String>,

    /// Set when a later contributor listed this key at a different rate.
    /// The first-seen rate is kept either way.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub rate_conflict: bool,
}

/// Why a request contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NonPositiveQuantity,
    UnknownFormulation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkippedRequest {
    pub request: IndentRequest,
    pub reason: SkipReason,
}

/// The aggregated procurement list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Indent {
    /// Sorted by `total_amount`, highest first; ties keep encounter order.
    pub lines: Vec<IndentLine>,
    pub grand_total_amount: f64,
    pub skipped: Vec<SkippedRequest>,
}

/// Aggregate ingredient demand for a batch of requests.
///
/// Requests with `quantity <= 0` and requests for unknown formulation ids
/// are skipped (and listed in [`Indent::skipped`]).
///
/// # Errors
///
/// Returns [`EngineError::NonFiniteQuantity`] if any request carries a NaN or
/// infinite quantity. The check runs before merging, so no partial indent is
/// ever produced.
pub fn aggregate<S>(source: &S, requests: &[IndentRequest]) -> Result<Indent>
where
    S: FormulationSource + ?Sized,
{
    if let Some(bad) = requests.iter().find(|r| !r.quantity.is_finite()) {
        return Err(EngineError::NonFiniteQuantity {
            formulation_id: bad.formulation_id,
            quantity: bad.quantity,
        });
    }

    let mut lines: Vec<IndentLine> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut skipped = Vec::new();

    for request in requests {
        if request.quantity <= 0.0 {
            skipped.push(SkippedRequest {
                request: *request,
                reason: SkipReason::NonPositiveQuantity,
            });
            continue;
        }
        let Some(formulation) = source.get(request.formulation_id) else {
            debug!(
                formulation_id = request.formulation_id,
                "skipping indent request for unknown formulation"
            );
            skipped.push(SkippedRequest {
                request: *request,
                reason: SkipReason::UnknownFormulation,
            });
            continue;
        };

        let scaled = scale_to(formulation, request.quantity, formulation.nominal_yield())?;

        for ing in scaled.ingredients() {
            let key = (ing.name.clone(), ing.unit.clone());
            match index.get(&key) {
                Some(&idx) => {
                    let line = &mut lines[idx];
                    line.total_quantity += ing.quantity;
                    line.total_amount += ing.amount();
                    if ing.rate != line.rate {
                        warn!(
                            ingredient = %ing.name,
                            unit = %ing.unit,
                            kept_rate = line.rate,
                            ignored_rate = ing.rate,
                            formulation = %formulation.slug,
                            "ingredient listed at different rates; keeping first-seen rate"
                        );
                        line.rate_conflict = true;
                    }
                    if !line.sources.contains(&formulation.slug) {
                        line.sources.push(formulation.slug.clone());
                    }
                }
                None => {
                    index.insert(key, lines.len());
                    lines.push(IndentLine {
                        name: ing.name.clone(),
                        unit: ing.unit.clone(),
                        total_quantity: ing.quantity,
                        rate: ing.rate,
                        total_amount: ing.amount(),
                        sources: vec![formulation.slug.clone()],
                        rate_conflict: false,
                    });
                }
            }
        }
    }

    // `sort_by` is stable, so equal totals stay in encounter order.
    lines.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
    let grand_total_amount = lines.iter().fold(0.0, |acc, l| acc + l.total_amount);

    Ok(Indent {
        lines,
        grand_total_amount,
        skipped,
    })
}
