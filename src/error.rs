use thiserror::Error;

use crate::models::{Metric, OverrideField};

#[derive(Debug, Error)]
pub enum RankError {
    #[error("Invalid priority for {metric}: {value} (expected a finite number in -10..=10)")]
    InvalidPriority { metric: Metric, value: f64 },

    #[error("Invalid override for {field}: {value}")]
    InvalidOverride { field: OverrideField, value: f64 },

    #[error("Override for {field} sets both an absolute value and a multiplier")]
    ConflictingOverride { field: OverrideField },

    #[error("Invalid weight: {0} (expected METRIC=NUMBER)")]
    InvalidWeight(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Unknown economic zone: {0}")]
    UnknownZone(String),

    #[error("Unknown price unit: {0}")]
    UnknownPriceUnit(String),

    #[error("Unknown override field: {0} (expected taste, health, ethics, price, time or calories)")]
    UnknownOverrideField(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Dish not found: {name}{}", .suggestion.as_ref().map(|s| format!(" (did you mean \"{s}\"?)")).unwrap_or_default())]
    DishNotFound {
        name: String,
        suggestion: Option<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, RankError>;
