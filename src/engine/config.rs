use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::constants::*;
use crate::engine::index::normalize_name;

/// One step of the passive-time penalty function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyStep {
    /// Passive hours strictly below this bound receive `penalty`.
    pub below_hours: f64,
    pub penalty: f64,
}

/// Tunable lookup tables and constants for the analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Health multiplier per normalized cooking state.
    pub cooking_coefficients: HashMap<String, f64>,
    /// Ascending passive-time steps.
    pub passive_penalty_steps: Vec<PenaltyStep>,
    /// Penalty applied beyond the last step.
    pub passive_penalty_cap: f64,
    /// Grams a zone unit price refers to.
    pub reference_unit_grams: f64,
    /// Score given to every dish when all priorities are zero.
    pub neutral_score: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cooking_coefficients: COOKING_COEFFICIENTS
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            passive_penalty_steps: PASSIVE_PENALTY_STEPS
                .iter()
                .map(|&(below_hours, penalty)| PenaltyStep {
                    below_hours,
                    penalty,
                })
                .collect(),
            passive_penalty_cap: PASSIVE_PENALTY_CAP,
            reference_unit_grams: REFERENCE_UNIT_GRAMS,
            neutral_score: NEUTRAL_SCORE,
        }
    }
}

impl EngineConfig {
    /// Health coefficient for a cooking state.
    ///
    /// States are normalized like ingredient names; unknown states are neutral.
    pub fn cooking_coef(&self, state: Option<&str>) -> f64 {
        state
            .map(normalize_name)
            .and_then(|key| self.cooking_coefficients.get(&key).copied())
            .unwrap_or(DEFAULT_COOKING_COEF)
    }

    /// Speed points lost to unattended waiting time.
    ///
    /// Monotonic in `hours`, zero for no passive time, capped.
    pub fn passive_time_penalty(&self, hours: f64) -> f64 {
        if hours.is_nan() || hours <= 0.0 {
            return 0.0;
        }
        self.passive_penalty_steps
            .iter()
            .find(|step| hours < step.below_hours)
            .map(|step| step.penalty)
            .unwrap_or(self.passive_penalty_cap)
    }

    /// Repair a user-supplied config so lookups stay monotonic and scores
    /// stay in range.
    ///
    /// Steps are sorted ascending and their penalties raised to a
    /// non-negative running maximum; the cap is never below the last step.
    pub fn normalized(mut self) -> Self {
        self.passive_penalty_steps
            .sort_by(|a, b| a.below_hours.total_cmp(&b.below_hours));
        let mut floor = 0.0_f64;
        for step in &mut self.passive_penalty_steps {
            if step.penalty.is_finite() {
                floor = floor.max(step.penalty);
            }
            step.penalty = floor;
        }
        self.passive_penalty_cap = if self.passive_penalty_cap.is_finite() {
            self.passive_penalty_cap.max(floor)
        } else {
            floor
        };
        self.neutral_score = self.neutral_score.min(MAX_SCORE);
        self.cooking_coefficients = self
            .cooking_coefficients
            .into_iter()
            .map(|(k, v)| (normalize_name(&k), v))
            .collect();
        if !(self.reference_unit_grams.is_finite() && self.reference_unit_grams > 0.0) {
            self.reference_unit_grams = REFERENCE_UNIT_GRAMS;
        }
        self
    }
}
