use serde::Serialize;

use crate::engine::constants::{NEUTRAL_PERCENTILE, NORMALIZED_MAX};

/// Which end of a distribution is preferable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Sorted sample of one raw metric across a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub direction: Direction,
    sorted: Vec<f64>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Distribution {
    /// Build from raw values, ignoring non-finite ones.
    pub fn new(values: impl IntoIterator<Item = f64>, direction: Direction) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);

        let (min, max, mean) = match (sorted.first(), sorted.last()) {
            (Some(&min), Some(&max)) => (min, max, sorted.iter().sum::<f64>() / sorted.len() as f64),
            _ => (0.0, 0.0, 0.0),
        };

        Self {
            direction,
            sorted,
            min,
            max,
            mean,
        }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Percentile rank of `value` in 0–100, where 100 is best.
    ///
    /// `100 × (values strictly worse than value) / (n − 1)`, clamped. Ties
    /// share a percentile. Datasets of fewer than two values yield the
    /// neutral percentile.
    pub fn percentile(&self, value: f64) -> f64 {
        let n = self.sorted.len();
        if n < 2 || !value.is_finite() {
            return NEUTRAL_PERCENTILE;
        }
        let worse = match self.direction {
            Direction::HigherIsBetter => self.sorted.partition_point(|&v| v < value),
            Direction::LowerIsBetter => n - self.sorted.partition_point(|&v| v <= value),
        };
        (100.0 * worse as f64 / (n - 1) as f64).clamp(0.0, 100.0)
    }

    /// Percentile mapped linearly onto 0–10.
    pub fn normalized(&self, value: f64) -> f64 {
        (self.percentile(value) / 10.0).clamp(0.0, NORMALIZED_MAX)
    }
}

/// Distributions behind the dataset-relative metrics of one variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    /// Price in the variant's unit, lower is better.
    pub cost: Distribution,
    /// Active minutes in the variant's mode, lower is better.
    pub time: Distribution,
    /// Calories per serving, higher is better.
    pub satiety: Distribution,
    /// Calorie density, lower is better.
    pub calorie_density: Distribution,
}
