use serde::Serialize;
use tracing::debug;

use crate::engine::config::EngineConfig;
use crate::engine::constants::{MAX_SCORE, NORMALIZED_MAX};
use crate::engine::variants::{Variant, VariantDish};
use crate::error::Result;
use crate::models::{Metric, PriorityVector};

/// One metric's share of a dish's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub metric: Metric,
    pub weight: f64,
    /// Normalized value as computed for the variant.
    pub value: f64,
    /// `value`, or `10 - value` when the weight is negative.
    pub oriented: f64,
    /// `|weight| × oriented`.
    pub weighted: f64,
}

/// A dish with its final position in the ranking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedDish {
    /// 1-based position after sorting.
    pub rank: usize,
    /// Integer score in 0–100.
    pub score: u8,
    pub entry: VariantDish,
    pub contributions: Vec<Contribution>,
}

impl RankedDish {
    pub fn name(&self) -> &str {
        self.entry.name()
    }
}

fn contributions(entry: &VariantDish, active: &[(Metric, f64)]) -> Vec<Contribution> {
    active
        .iter()
        .map(|&(metric, weight)| {
            let value = entry.normalized.get(metric);
            let oriented = if weight > 0.0 {
                value
            } else {
                NORMALIZED_MAX - value
            };
            Contribution {
                metric,
                weight,
                value,
                oriented,
                weighted: weight.abs() * oriented,
            }
        })
        .collect()
}

/// Weighted score for one dish, 0–100.
///
/// Returns `neutral` when no metric is active.
pub fn score_dish(contributions: &[Contribution], neutral: u8) -> u8 {
    let total_weight: f64 = contributions.iter().map(|c| c.weight.abs()).sum();
    if total_weight <= 0.0 {
        return neutral.min(MAX_SCORE);
    }
    let weighted: f64 = contributions.iter().map(|c| c.weighted).sum();
    (10.0 * weighted / total_weight)
        .round()
        .clamp(0.0, f64::from(MAX_SCORE)) as u8
}

/// Score every dish in a variant and sort best-first.
///
/// Sorting is stable on catalog order so equal scores never swap places
/// between recomputations.
pub fn score_and_sort_dishes(
    variant: &Variant,
    priorities: &PriorityVector,
    config: &EngineConfig,
) -> Result<Vec<RankedDish>> {
    priorities.validate()?;
    let active = priorities.active();

    let mut scored: Vec<RankedDish> = variant
        .dishes
        .iter()
        .map(|entry| {
            let contributions = contributions(entry, &active);
            RankedDish {
                rank: 0,
                score: score_dish(&contributions, config.neutral_score),
                entry: entry.clone(),
                contributions,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score.cmp(&a.score).then_with(|| {
            a.entry
                .analysis
                .catalog_index
                .cmp(&b.entry.analysis.catalog_index)
        })
    });
    for (i, ranked) in scored.iter_mut().enumerate() {
        ranked.rank = i + 1;
    }

    debug!(
        variant = %variant.key,
        dishes = scored.len(),
        active_metrics = active.len(),
        "scored variant"
    );
    Ok(scored)
}

/// Keep ranked dishes whose name or description contains `query`.
///
/// Matching is case-insensitive; ranks are left as computed.
pub fn filter_ranked<'a>(ranked: &'a [RankedDish], query: &str) -> Vec<&'a RankedDish> {
    ranked
        .iter()
        .filter(|r| r.entry.analysis.dish.matches_query(query))
        .collect()
}
