use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};
use crate::models::Metric;

/// Largest absolute priority weight.
pub const PRIORITY_LIMIT: f64 = 10.0;

/// Signed per-metric weights in `-10..=10`.
///
/// Positive prefers more of a metric, negative prefers less, zero ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriorityVector {
    pub taste: f64,
    pub health: f64,
    pub cheapness: f64,
    pub speed: f64,
    pub satiety: f64,
    pub low_calorie: f64,
    pub ethics: f64,
}

impl PriorityVector {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Taste => self.taste,
            Metric::Health => self.health,
            Metric::Cheapness => self.cheapness,
            Metric::Speed => self.speed,
            Metric::Satiety => self.satiety,
            Metric::LowCalorie => self.low_calorie,
            Metric::Ethics => self.ethics,
        }
    }

    pub fn set(&mut self, metric: Metric, weight: f64) {
        match metric {
            Metric::Taste => self.taste = weight,
            Metric::Health => self.health = weight,
            Metric::Cheapness => self.cheapness = weight,
            Metric::Speed => self.speed = weight,
            Metric::Satiety => self.satiety = weight,
            Metric::LowCalorie => self.low_calorie = weight,
            Metric::Ethics => self.ethics = weight,
        }
    }

    /// Reject non-finite or out-of-range weights.
    pub fn validate(&self) -> Result<()> {
        for metric in Metric::ALL {
            let value = self.get(metric);
            if !value.is_finite() || value.abs() > PRIORITY_LIMIT {
                return Err(RankError::InvalidPriority { metric, value });
            }
        }
        Ok(())
    }

    /// Metrics with a non-zero weight, in display order.
    pub fn active(&self) -> Vec<(Metric, f64)> {
        Metric::ALL
            .into_iter()
            .map(|m| (m, self.get(m)))
            .filter(|(_, w)| *w != 0.0)
            .collect()
    }

    pub fn is_neutral(&self) -> bool {
        self.active().is_empty()
    }

    /// Flip the sign of every non-zero weight.
    pub fn inverted(&self) -> Self {
        let mut out = *self;
        for metric in Metric::ALL {
            let w = self.get(metric);
            if w != 0.0 {
                out.set(metric, -w);
            }
        }
        out
    }
}
