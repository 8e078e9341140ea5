use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ingredient catalog entry with nutrition, ethics and zone prices.
///
/// Prices are per kilogram in each zone's local reference currency. A zone
/// missing from `prices` means the ingredient is unavailable there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub health_index: Option<f64>,

    #[serde(default)]
    pub ethics_index: Option<f64>,

    #[serde(default)]
    pub ethics_reason: String,

    #[serde(default)]
    pub prices: BTreeMap<String, f64>,
}

impl Ingredient {
    /// Unit price in `zone`, or the mean over every zone that prices the
    /// ingredient when no zone is selected.
    pub fn unit_price(&self, zone: Option<&str>) -> Option<f64> {
        match zone {
            Some(id) => self.prices.get(id).copied().filter(|p| p.is_finite()),
            None => {
                let priced: Vec<f64> = self
                    .prices
                    .values()
                    .copied()
                    .filter(|p| p.is_finite())
                    .collect();
                if priced.is_empty() {
                    None
                } else {
                    Some(priced.iter().sum::<f64>() / priced.len() as f64)
                }
            }
        }
    }

    /// True when no zone carries a usable price.
    pub fn is_unpriced(&self) -> bool {
        !self.prices.values().any(|p| p.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saffron() -> Ingredient {
        let mut prices = BTreeMap::new();
        prices.insert("mediterranean".to_string(), 4000.0);
        prices.insert("mena_arid".to_string(), 2000.0);
        Ingredient {
            name: "Saffron".to_string(),
            health_index: Some(7.0),
            ethics_index: Some(5.0),
            ethics_reason: String::new(),
            prices,
        }
    }

    #[test]
    fn test_unit_price_in_zone() {
        let ing = saffron();
        assert_eq!(ing.unit_price(Some("mediterranean")), Some(4000.0));
        assert_eq!(ing.unit_price(Some("oceanic")), None);
    }

    #[test]
    fn test_unit_price_global_average() {
        let ing = saffron();
        assert_eq!(ing.unit_price(None), Some(3000.0));
    }

    #[test]
    fn test_is_unpriced() {
        let mut ing = saffron();
        assert!(!ing.is_unpriced());
        ing.prices.clear();
        assert!(ing.is_unpriced());
        assert_eq!(ing.unit_price(None), None);
    }
}
