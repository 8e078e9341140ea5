use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{RankError, Result};
use crate::models::{
    preset_by_id, validate_zone, CookingMode, OverrideField, OverrideMap, OverrideSet, PriceUnit,
    PriorityVector, VariantKey, PRESETS,
};

/// Caller-owned ranking preferences.
///
/// Passed explicitly into every engine call; nothing reads it implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// `None` ranks at global average prices.
    pub selected_zone: Option<String>,
    pub priorities: PriorityVector,
    pub price_unit: PriceUnit,
    pub is_optimized: bool,
    /// Per-dish corrections keyed by dish name.
    pub overrides: OverrideMap,
}

impl Default for Preferences {
    fn default() -> Self {
        let settings = &PRESETS[0].settings;
        Self {
            selected_zone: settings.selected_zone.clone(),
            priorities: settings.priorities,
            price_unit: settings.price_unit,
            is_optimized: settings.is_optimized,
            overrides: OverrideMap::new(),
        }
    }
}

impl Preferences {
    pub fn mode(&self) -> CookingMode {
        CookingMode::from_optimized(self.is_optimized)
    }

    pub fn variant_key(&self) -> VariantKey {
        VariantKey::new(self.mode(), self.price_unit)
    }

    pub fn zone(&self) -> Option<&str> {
        self.selected_zone.as_deref()
    }

    /// Select a zone, or the global average with `None`.
    pub fn set_zone(&mut self, zone: Option<&str>) -> Result<()> {
        validate_zone(zone)?;
        self.selected_zone = zone.map(str::to_string);
        Ok(())
    }

    /// Copy a built-in preset's settings. Overrides are kept.
    pub fn apply_preset(&mut self, id: &str) -> Result<()> {
        let preset = preset_by_id(id).ok_or_else(|| RankError::UnknownPreset(id.to_string()))?;
        let settings = &preset.settings;
        self.priorities = settings.priorities;
        self.price_unit = settings.price_unit;
        self.is_optimized = settings.is_optimized;
        self.selected_zone = settings.selected_zone.clone();
        info!(preset = %preset.id, "applied preset");
        Ok(())
    }

    pub fn overrides_for(&self, dish: &str) -> Option<&OverrideSet> {
        self.overrides.get(dish)
    }

    pub fn set_override_value(&mut self, dish: &str, field: OverrideField, value: f64) -> Result<()> {
        let mut set = self.overrides.get(dish).cloned().unwrap_or_default();
        set.set_absolute(field, value)?;
        self.store(dish, set);
        Ok(())
    }

    pub fn set_override_multiplier(
        &mut self,
        dish: &str,
        field: OverrideField,
        factor: f64,
    ) -> Result<()> {
        let mut set = self.overrides.get(dish).cloned().unwrap_or_default();
        set.set_multiplier(field, factor)?;
        self.store(dish, set);
        Ok(())
    }

    pub fn clear_override(&mut self, dish: &str, field: OverrideField) {
        if let Some(set) = self.overrides.get_mut(dish) {
            set.clear(field);
            if set.is_empty() {
                self.overrides.remove(dish);
            }
        }
    }

    /// Remove overrides for one dish, or for every dish with `None`.
    ///
    /// Returns the number of dishes whose overrides were dropped.
    pub fn reset_overrides(&mut self, dish: Option<&str>) -> usize {
        match dish {
            Some(name) => usize::from(self.overrides.remove(name).is_some()),
            None => {
                let count = self.overrides.len();
                self.overrides.clear();
                count
            }
        }
    }

    fn store(&mut self, dish: &str, set: OverrideSet) {
        if set.is_empty() {
            self.overrides.remove(dish);
        } else {
            self.overrides.insert(dish.to_string(), set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OverrideValue;

    #[test]
    fn test_default_matches_first_preset() {
        let prefs = Preferences::default();
        assert_eq!(prefs.priorities.taste, 10.0);
        assert_eq!(prefs.price_unit, PriceUnit::Per1000Kcal);
        assert_eq!(prefs.variant_key().to_string(), "optimized:per1000kcal");
        assert!(prefs.zone().is_none());
    }

    #[test]
    fn test_apply_preset_keeps_overrides() {
        let mut prefs = Preferences::default();
        prefs
            .set_override_value("Borscht", OverrideField::Taste, 9.0)
            .unwrap();
        prefs.apply_preset("worst-food-ever").unwrap();
        assert_eq!(prefs.priorities.taste, -10.0);
        assert!(prefs.overrides_for("Borscht").is_some());
        assert!(prefs.apply_preset("no-such-preset").is_err());
    }

    #[test]
    fn test_set_zone_rejects_unknown() {
        let mut prefs = Preferences::default();
        prefs.set_zone(Some("oceanic")).unwrap();
        assert_eq!(prefs.zone(), Some("oceanic"));
        assert!(prefs.set_zone(Some("narnia")).is_err());
        assert_eq!(prefs.zone(), Some("oceanic"));
        prefs.set_zone(None).unwrap();
        assert!(prefs.zone().is_none());
    }

    #[test]
    fn test_override_editing() {
        let mut prefs = Preferences::default();
        prefs
            .set_override_multiplier("Borscht", OverrideField::Taste, 1.2)
            .unwrap();
        assert_eq!(
            prefs.overrides_for("Borscht").unwrap().get(OverrideField::Taste),
            Some(OverrideValue::Multiplier(1.2))
        );

        // A unit multiplier is no override at all.
        prefs
            .set_override_multiplier("Borscht", OverrideField::Taste, 1.0)
            .unwrap();
        assert!(prefs.overrides_for("Borscht").is_none());

        prefs
            .set_override_value("Borscht", OverrideField::Price, 2.5)
            .unwrap();
        prefs.clear_override("Borscht", OverrideField::Price);
        assert!(prefs.overrides.is_empty());
    }

    #[test]
    fn test_reset_overrides() {
        let mut prefs = Preferences::default();
        prefs.set_override_value("A", OverrideField::Time, 5.0).unwrap();
        prefs.set_override_value("B", OverrideField::Time, 7.0).unwrap();
        assert_eq!(prefs.reset_overrides(Some("A")), 1);
        assert_eq!(prefs.reset_overrides(Some("A")), 0);
        assert_eq!(prefs.reset_overrides(None), 1);
        assert!(prefs.overrides.is_empty());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"selectedZone": "mediterranean", "isOptimized": false}"#)
                .unwrap();
        assert_eq!(prefs.zone(), Some("mediterranean"));
        assert_eq!(prefs.mode(), CookingMode::Normal);
        assert_eq!(prefs.priorities.health, 10.0);
    }
}
