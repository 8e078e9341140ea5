use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::engine::EngineConfig;
use crate::error::Result;
use crate::models::{Dish, Ingredient};
use crate::state::Preferences;

/// Load the dish catalog from a JSON array, keeping file order.
///
/// Duplicate names are kept but logged; lookups resolve to the last one.
pub fn load_dishes<P: AsRef<Path>>(path: P) -> Result<Vec<Dish>> {
    let content = fs::read_to_string(path)?;
    let dishes: Vec<Dish> = serde_json::from_str(&content)?;

    let mut seen = HashSet::new();
    for dish in &dishes {
        if !seen.insert(dish.name.trim().to_lowercase()) {
            warn!(dish = %dish.name, "duplicate dish name in catalog");
        }
    }

    debug!(count = dishes.len(), "loaded dishes");
    Ok(dishes)
}

/// Load the ingredient catalog from a JSON array.
pub fn load_ingredients<P: AsRef<Path>>(path: P) -> Result<Vec<Ingredient>> {
    let content = fs::read_to_string(path)?;
    let ingredients: Vec<Ingredient> = serde_json::from_str(&content)?;
    debug!(count = ingredients.len(), "loaded ingredients");
    Ok(ingredients)
}

/// Load saved preferences, or defaults when the file does not exist yet.
pub fn load_preferences<P: AsRef<Path>>(path: P) -> Result<Preferences> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no saved preferences; using defaults");
        return Ok(Preferences::default());
    }
    let content = fs::read_to_string(path)?;
    let prefs: Preferences = serde_json::from_str(&content)?;
    prefs.priorities.validate()?;
    Ok(prefs)
}

/// Save preferences as pretty-printed JSON.
pub fn save_preferences<P: AsRef<Path>>(path: P, prefs: &Preferences) -> Result<()> {
    let json = serde_json::to_string_pretty(prefs)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load engine tuning, falling back to defaults for absent fields.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
    let content = fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&content)?;
    Ok(config.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OverrideField, OverrideValue};
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_load_dishes_keeps_order() {
        let json = r#"[
            {"name": "Toast", "ingredients": [{"name": "Bread", "g": 60, "state": "baked"}], "weight": 60, "calories": 160, "taste": 5},
            {"name": "Porridge", "ingredients": [{"name": "Oats", "grams": 50}], "weight": 250, "calories": 190, "taste_score": 6},
            {"name": "toast", "weight": 80, "calories": 200}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let dishes = load_dishes(file.path()).unwrap();
        assert_eq!(dishes.len(), 3);
        assert_eq!(dishes[0].name, "Toast");
        assert_eq!(dishes[1].taste, 6.0);
        assert_eq!(dishes[2].name, "toast");
    }

    #[test]
    fn test_load_ingredients() {
        let json = r#"[
            {"name": "Oats", "health_index": 8, "ethics_index": 7, "prices": {"oceanic": 2.4}},
            {"name": "Truffle", "health_index": 6}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let ingredients = load_ingredients(file.path()).unwrap();
        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients[0].unit_price(Some("oceanic")), Some(2.4));
        assert!(ingredients[1].is_unpriced());
    }

    #[test]
    fn test_preferences_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let missing = load_preferences(&path).unwrap();
        assert_eq!(missing, Preferences::default());

        let mut prefs = Preferences::default();
        prefs.set_zone(Some("mena_arid")).unwrap();
        prefs
            .set_override_multiplier("Toast", OverrideField::Taste, 1.2)
            .unwrap();
        save_preferences(&path, &prefs).unwrap();

        let reloaded = load_preferences(&path).unwrap();
        assert_eq!(reloaded, prefs);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"tasteMul\": 1.2"));
        assert_eq!(
            reloaded.overrides_for("Toast").unwrap().get(OverrideField::Taste),
            Some(OverrideValue::Multiplier(1.2))
        );
    }

    #[test]
    fn test_conflicting_override_rejected() {
        let json = r#"{"overrides": {"Toast": {"taste": 4, "tasteMul": 1.5}}}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        assert!(load_preferences(file.path()).is_err());
    }

    #[test]
    fn test_out_of_range_priority_rejected() {
        let json = r#"{"priorities": {"taste": 11}}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        assert!(load_preferences(file.path()).is_err());
    }

    #[test]
    fn test_load_config_partial() {
        let json = r#"{"neutral_score": 40, "cooking_coefficients": {"Air Fried": 0.9}}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.neutral_score, 40);
        assert_eq!(config.cooking_coef(Some("air-fried")), 0.9);
        assert_eq!(config.passive_time_penalty(0.5), 0.5);
    }
}
