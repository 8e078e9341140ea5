use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::{RankError, Result};
use crate::models::Metric;

/// dish_ranker: rank a dish catalog against weighted taste, health, cost and speed priorities.
#[derive(Parser, Debug)]
#[command(name = "dish_ranker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the dish catalog JSON file.
    #[arg(short, long, default_value = "dishes.json")]
    pub dishes: PathBuf,

    /// Path to the ingredient catalog JSON file.
    #[arg(short, long, default_value = "ingredients.json")]
    pub ingredients: PathBuf,

    /// Path to the saved preferences JSON file.
    #[arg(short, long, default_value = "preferences.json")]
    pub prefs: PathBuf,

    /// Optional engine tuning JSON file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Per-run ranking options layered over the saved preferences.
#[derive(Args, Debug, Default)]
pub struct RankArgs {
    /// Economic zone id, or "global" for average prices.
    #[arg(short, long)]
    pub zone: Option<String>,

    /// Price unit: serving, per1kg or per1000kcal.
    #[arg(short, long)]
    pub unit: Option<String>,

    /// Use optimized cooking times.
    #[arg(long, conflicts_with = "normal")]
    pub optimized: bool,

    /// Use normal cooking times.
    #[arg(long)]
    pub normal: bool,

    /// Start from a built-in preset.
    #[arg(long)]
    pub preset: Option<String>,

    /// Override one priority for this run, e.g. `--weight taste=8`. Repeatable.
    #[arg(short, long = "weight", value_name = "METRIC=WEIGHT")]
    pub weights: Vec<String>,

    /// Invert every priority.
    #[arg(long)]
    pub worst: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank the catalog.
    Rank {
        #[command(flatten)]
        args: RankArgs,

        /// Show only the first N dishes.
        #[arg(long)]
        top: Option<usize>,

        /// Only show dishes whose name or description matches.
        #[arg(long)]
        search: Option<String>,

        /// Also write the ranking to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List economic zones.
    Zones,

    /// Show a dish's cost in every zone.
    Cost {
        /// Dish name.
        dish: String,
    },

    /// Explain a dish's metrics and score.
    Explain {
        /// Dish name.
        dish: String,

        #[command(flatten)]
        args: RankArgs,
    },

    /// Set or clear a per-dish override.
    Override {
        /// Dish name.
        dish: String,

        /// Field: taste, health, ethics, price, time or calories.
        #[arg(short, long)]
        metric: String,

        /// Absolute replacement value.
        #[arg(long, conflicts_with_all = ["mul", "clear"])]
        value: Option<f64>,

        /// Multiplier applied to the catalog value.
        #[arg(long, conflicts_with = "clear")]
        mul: Option<f64>,

        /// Remove the override for this field.
        #[arg(long)]
        clear: bool,
    },

    /// Remove overrides for one dish, or for all dishes.
    ResetOverrides {
        /// Dish name; all dishes when omitted.
        dish: Option<String>,
    },

    /// List built-in presets.
    Presets,
}

impl Default for Command {
    fn default() -> Self {
        Command::Rank {
            args: RankArgs::default(),
            top: None,
            search: None,
            csv: None,
        }
    }
}

/// Parse a `--weight` argument of the form `metric=weight`.
pub fn parse_weight(spec: &str) -> Result<(Metric, f64)> {
    let (key, value) = spec.split_once('=').unwrap_or((spec, ""));
    let metric = Metric::from_key(key).ok_or_else(|| RankError::UnknownMetric(key.to_string()))?;
    let weight = value
        .trim()
        .parse::<f64>()
        .map_err(|_| RankError::InvalidWeight(spec.to_string()))?;
    Ok((metric, weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        let (metric, weight) = parse_weight("taste=8").unwrap();
        assert_eq!(metric, Metric::Taste);
        assert_eq!(weight, 8.0);

        let (metric, weight) = parse_weight("low-calorie= -2.5").unwrap();
        assert_eq!(metric, Metric::LowCalorie);
        assert_eq!(weight, -2.5);
    }

    #[test]
    fn test_parse_weight_reports_raw_text() {
        let err = parse_weight("taste=abc").unwrap_err();
        assert!(matches!(&err, RankError::InvalidWeight(raw) if raw == "taste=abc"));
        assert!(err.to_string().contains("taste=abc"));
        assert!(!err.to_string().contains("NaN"));

        assert!(matches!(parse_weight("taste"), Err(RankError::InvalidWeight(_))));
        assert!(matches!(parse_weight("flavor=3"), Err(RankError::UnknownMetric(_))));
    }
}
