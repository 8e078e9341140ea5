use std::collections::HashMap;
use std::sync::LazyLock;

/// Grams that a zone unit price refers to (prices are per kilogram).
pub const REFERENCE_UNIT_GRAMS: f64 = 1000.0;

/// Upper bound of every normalized metric.
pub const NORMALIZED_MAX: f64 = 10.0;

/// Normalized value used when a metric cannot be computed for a dish.
pub const NEUTRAL_METRIC: f64 = 5.0;

/// Percentile given to a dish in a dataset too small to rank.
pub const NEUTRAL_PERCENTILE: f64 = 50.0;

/// Score every dish gets when no priority is active.
pub const NEUTRAL_SCORE: u8 = 50;

/// Upper bound of a dish score.
pub const MAX_SCORE: u8 = 100;

/// Ethics value for dishes without any ethics data.
pub const DEFAULT_ETHICS: f64 = 5.0;

/// Coefficient for an ingredient whose cooking state is absent or unknown.
pub const DEFAULT_COOKING_COEF: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Passive time
// ─────────────────────────────────────────────────────────────────────────────

/// Penalty once passive time reaches the last step.
pub const PASSIVE_PENALTY_CAP: f64 = 3.0;

/// `(upper bound in hours, penalty)` steps, ascending. Passive time below an
/// upper bound receives that step's penalty.
pub const PASSIVE_PENALTY_STEPS: [(f64, f64); 5] = [
    (1.0, 0.5),
    (2.0, 1.0),
    (4.0, 1.5),
    (8.0, 2.0),
    (24.0, 2.5),
];

// ─────────────────────────────────────────────────────────────────────────────
// Cooking states
// ─────────────────────────────────────────────────────────────────────────────

/// Health multiplier per normalized cooking state.
pub static COOKING_COEFFICIENTS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("raw", 1.00);
    m.insert("fermented", 1.05);
    m.insert("steamed", 0.95);
    m.insert("boiled", 0.90);
    m.insert("pickled", 0.90);
    m.insert("stewed", 0.88);
    m.insert("baked", 0.85);
    m.insert("roasted", 0.82);
    m.insert("sauteed", 0.82);
    m.insert("grilled", 0.80);
    m.insert("smoked", 0.75);
    m.insert("fried", 0.70);
    m.insert("deep_fried", 0.55);
    m
});

/// Human-readable cooking state label.
pub fn cooking_label(state: &str) -> &'static str {
    match state {
        "raw" => "raw",
        "fermented" => "fermented",
        "steamed" => "steamed",
        "boiled" => "boiled",
        "pickled" => "pickled",
        "stewed" => "stewed",
        "baked" => "baked",
        "roasted" => "roasted",
        "sauteed" => "sautéed",
        "grilled" => "grilled",
        "smoked" => "smoked",
        "fried" => "fried",
        "deep_fried" => "deep-fried",
        _ => "as is",
    }
}
