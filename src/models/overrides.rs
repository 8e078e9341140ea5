use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::constants::NORMALIZED_MAX;
use crate::error::{RankError, Result};

/// Multipliers closer than this to 1.0 count as "no override".
pub const MULTIPLIER_EPSILON: f64 = 1e-3;

/// Dish quantities a user can correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverrideField {
    Taste,
    Health,
    Ethics,
    /// Price per serving.
    Price,
    /// Active minutes.
    Time,
    /// Calories per serving.
    Calories,
}

impl OverrideField {
    pub const ALL: [OverrideField; 6] = [
        OverrideField::Taste,
        OverrideField::Health,
        OverrideField::Ethics,
        OverrideField::Price,
        OverrideField::Time,
        OverrideField::Calories,
    ];

    pub fn key(self) -> &'static str {
        match self {
            OverrideField::Taste => "taste",
            OverrideField::Health => "health",
            OverrideField::Ethics => "ethics",
            OverrideField::Price => "price",
            OverrideField::Time => "time",
            OverrideField::Calories => "calories",
        }
    }

    pub fn from_key(key: &str) -> Option<OverrideField> {
        let key = key.trim().to_lowercase();
        OverrideField::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Score fields live on the 0–10 scale; the rest are non-negative quantities.
    pub fn is_score(self) -> bool {
        matches!(
            self,
            OverrideField::Taste | OverrideField::Health | OverrideField::Ethics
        )
    }

    /// Apply an override to a base value, clamping to the field's domain.
    pub fn apply(self, base: f64, value: OverrideValue) -> f64 {
        let raw = match value {
            OverrideValue::Absolute(v) => v,
            OverrideValue::Multiplier(m) => base * m,
        };
        if self.is_score() {
            raw.clamp(0.0, NORMALIZED_MAX)
        } else {
            raw.max(0.0)
        }
    }
}

impl fmt::Display for OverrideField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Either an absolute replacement or a multiplicative factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverrideValue {
    Absolute(f64),
    Multiplier(f64),
}

/// Per-dish user corrections. At most one form per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OverrideWire", into = "OverrideWire")]
pub struct OverrideSet {
    values: BTreeMap<OverrideField, OverrideValue>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: OverrideField) -> Option<OverrideValue> {
        self.values.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverrideField, OverrideValue)> + '_ {
        self.values.iter().map(|(f, v)| (*f, *v))
    }

    /// Set an absolute value, replacing any multiplier for the field.
    pub fn set_absolute(&mut self, field: OverrideField, value: f64) -> Result<()> {
        let valid = value.is_finite() && value >= 0.0 && (!field.is_score() || value <= NORMALIZED_MAX);
        if !valid {
            return Err(RankError::InvalidOverride { field, value });
        }
        self.values.insert(field, OverrideValue::Absolute(value));
        Ok(())
    }

    /// Set a multiplier, replacing any absolute value for the field.
    ///
    /// A multiplier within [`MULTIPLIER_EPSILON`] of 1.0 removes the override.
    pub fn set_multiplier(&mut self, field: OverrideField, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(RankError::InvalidOverride {
                field,
                value: factor,
            });
        }
        if (factor - 1.0).abs() < MULTIPLIER_EPSILON {
            self.values.remove(&field);
        } else {
            self.values.insert(field, OverrideValue::Multiplier(factor));
        }
        Ok(())
    }

    pub fn clear(&mut self, field: OverrideField) {
        self.values.remove(&field);
    }

    /// Effective value of `field` given its catalog-derived base.
    pub fn effective(&self, field: OverrideField, base: f64) -> f64 {
        match self.get(field) {
            Some(value) => field.apply(base, value),
            None => base,
        }
    }

    pub fn has(&self, field: OverrideField) -> bool {
        self.values.contains_key(&field)
    }
}

/// Flat serialized shape: `{ "tasteMul": 1.2, "price": 3.5, ... }`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverrideWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    taste: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    taste_mul: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    health: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    health_mul: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ethics: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ethics_mul: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price_mul: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_mul: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    calories_mul: Option<f64>,
}

impl OverrideWire {
    fn slots(&mut self, field: OverrideField) -> (&mut Option<f64>, &mut Option<f64>) {
        match field {
            OverrideField::Taste => (&mut self.taste, &mut self.taste_mul),
            OverrideField::Health => (&mut self.health, &mut self.health_mul),
            OverrideField::Ethics => (&mut self.ethics, &mut self.ethics_mul),
            OverrideField::Price => (&mut self.price, &mut self.price_mul),
            OverrideField::Time => (&mut self.time, &mut self.time_mul),
            OverrideField::Calories => (&mut self.calories, &mut self.calories_mul),
        }
    }
}

impl TryFrom<OverrideWire> for OverrideSet {
    type Error = RankError;

    fn try_from(mut wire: OverrideWire) -> Result<Self> {
        let mut set = OverrideSet::new();
        for field in OverrideField::ALL {
            match wire.slots(field) {
                (Some(_), Some(_)) => return Err(RankError::ConflictingOverride { field }),
                (Some(value), None) => set.set_absolute(field, *value)?,
                (None, Some(factor)) => set.set_multiplier(field, *factor)?,
                (None, None) => {}
            }
        }
        Ok(set)
    }
}

impl From<OverrideSet> for OverrideWire {
    fn from(set: OverrideSet) -> Self {
        let mut wire = OverrideWire::default();
        for (field, value) in set.iter() {
            let (absolute, multiplier) = wire.slots(field);
            match value {
                OverrideValue::Absolute(v) => *absolute = Some(v),
                OverrideValue::Multiplier(m) => *multiplier = Some(m),
            }
        }
        wire
    }
}

/// Caller-owned overrides keyed by dish name.
pub type OverrideMap = BTreeMap<String, OverrideSet>;
