use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven rankable dish metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Taste,
    Health,
    Cheapness,
    Speed,
    Satiety,
    LowCalorie,
    Ethics,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Metric; 7] = [
        Metric::Taste,
        Metric::Health,
        Metric::Cheapness,
        Metric::Speed,
        Metric::Satiety,
        Metric::LowCalorie,
        Metric::Ethics,
    ];

    /// Key used in JSON and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Taste => "taste",
            Metric::Health => "health",
            Metric::Cheapness => "cheapness",
            Metric::Speed => "speed",
            Metric::Satiety => "satiety",
            Metric::LowCalorie => "lowCalorie",
            Metric::Ethics => "ethics",
        }
    }

    /// Short label for tables.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Taste => "Taste",
            Metric::Health => "Health",
            Metric::Cheapness => "Budget",
            Metric::Speed => "Speed",
            Metric::Satiety => "Satiety",
            Metric::LowCalorie => "Low-Cal",
            Metric::Ethics => "Ethics",
        }
    }

    /// Parse a metric key, case-insensitively.
    pub fn from_key(key: &str) -> Option<Metric> {
        let key = key.trim().to_lowercase().replace(['-', '_'], "");
        Metric::ALL
            .into_iter()
            .find(|m| m.key().to_lowercase() == key)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Values for every metric, indexed by [`Metric`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricValues {
    pub taste: f64,
    pub health: f64,
    pub cheapness: f64,
    pub speed: f64,
    pub satiety: f64,
    pub low_calorie: f64,
    pub ethics: f64,
}

impl MetricValues {
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

    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Taste => self.taste = value,
            Metric::Health => self.health = value,
            Metric::Cheapness => self.cheapness = value,
            Metric::Speed => self.speed = value,
            Metric::Satiety => self.satiety = value,
            Metric::LowCalorie => self.low_calorie = value,
            Metric::Ethics => self.ethics = value,
        }
    }

    /// Iterate `(metric, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_variants() {
        assert_eq!(Metric::from_key("lowCalorie"), Some(Metric::LowCalorie));
        assert_eq!(Metric::from_key("low-calorie"), Some(Metric::LowCalorie));
        assert_eq!(Metric::from_key("LOW_CALORIE"), Some(Metric::LowCalorie));
        assert_eq!(Metric::from_key("Cheapness"), Some(Metric::Cheapness));
        assert_eq!(Metric::from_key("price"), None);
    }

    #[test]
    fn test_metric_values_get_set() {
        let mut values = MetricValues::default();
        values.set(Metric::Satiety, 4.5);
        assert_eq!(values.get(Metric::Satiety), 4.5);
        assert_eq!(values.iter().filter(|(_, v)| *v != 0.0).count(), 1);
    }
}
