use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::sniffer::{round2, SniffResult};

/// Fallback weight for sniffer names missing from the table.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Read-only mapping from sniffer name to importance weight, with a default
/// for unlisted names. Built once at startup and passed into the scorer;
/// never mutated during analysis.
#[derive(Debug, Clone)]
pub struct WeightTable {
    weights: HashMap<String, f64>,
    default: f64,
}

impl Default for WeightTable {
    /// Built-in weights. Domain and tech-stack signals are near-definitive;
    /// stylistic signals (design, color) are weaker correlators and weighted
    /// down.
    fn default() -> Self {
        let weights = [
            ("Domain", 2.0),
            ("TechStack", 1.6),
            ("Meta", 1.5),
            ("Boilerplate", 1.5),
            ("Comments", 1.4),
            ("Content", 1.2),
            ("ColorPalette", 1.1),
            ("UIKit", 1.0),
            ("Design", 0.8),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();
        Self {
            weights,
            default: DEFAULT_WEIGHT,
        }
    }
}

impl WeightTable {
    /// Weight for a sniffer name, falling back to the default.
    pub fn weight_for(&self, sniffer: &str) -> f64 {
        self.weights.get(sniffer).copied().unwrap_or(self.default)
    }

    /// Override the weight for one sniffer name. Weights must be positive.
    pub fn set(
        &mut self,
        sniffer: impl Into<String>,
        weight: f64,
    ) -> Result<(), InvalidWeightError> {
        let sniffer = sniffer.into();
        if !(weight > 0.0 && weight.is_finite()) {
            return Err(InvalidWeightError { sniffer, weight });
        }
        self.weights.insert(sniffer, weight);
        Ok(())
    }
}

/// Error raised when a weight override is not a positive finite number.
#[derive(Debug, Error)]
#[error("weight for `{sniffer}` must be a positive number (got {weight})")]
pub struct InvalidWeightError {
    pub sniffer: String,
    pub weight: f64,
}

/// The combined verdict over one page: a weighted overall score plus the
/// per-sniffer results in registry order.
#[derive(Debug, Clone)]
pub struct OverallScore {
    /// Weight-normalized score in `[0, 1]`, rounded to two decimals.
    pub total_score: f64,
    /// Every sniffer's result, unfiltered, in registry order.
    pub report: Vec<SniffResult>,
}

/// Combine sniffer results into one overall score.
///
/// Results with score strictly 0 contributed nothing and are excluded from
/// both the weighted sum and the weight total, so near-miss zeros do not
/// dilute the average. The returned report keeps every result in its original
/// order regardless.
pub fn calculate_overall_score(results: Vec<SniffResult>, weights: &WeightTable) -> OverallScore {
    if results.is_empty() {
        return OverallScore {
            total_score: 0.0,
            report: Vec::new(),
        };
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for result in &results {
        if result.score > 0.0 {
            let weight = weights.weight_for(&result.sniffer);
            weighted_sum += result.score * weight;
            total_weight += weight;
        }
    }

    let total_score = if total_weight > 0.0 {
        round2((weighted_sum / total_weight).min(1.0))
    } else {
        0.0
    };
    debug!(%total_score, contributing_weight = total_weight, "combined sniffer results");

    OverallScore {
        total_score,
        report: results,
    }
}
