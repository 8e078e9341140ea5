use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::models::{PriceUnit, PriorityVector};

/// Settings a preset applies to the caller's preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSettings {
    pub priorities: PriorityVector,
    #[serde(default)]
    pub price_unit: PriceUnit,
    #[serde(default = "default_optimized")]
    pub is_optimized: bool,
    #[serde(default)]
    pub selected_zone: Option<String>,
}

fn default_optimized() -> bool {
    true
}

/// A named priority preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub settings: PresetSettings,
}

/// Built-in presets.
pub static PRESETS: LazyLock<Vec<Preset>> = LazyLock::new(|| {
    let best = PriorityVector {
        taste: 10.0,
        health: 10.0,
        cheapness: 10.0,
        speed: 10.0,
        ..Default::default()
    };
    vec![
        Preset {
            id: "best-food-ever".to_string(),
            name: "Best Food Ever".to_string(),
            description: "Personal food leaderboard".to_string(),
            settings: PresetSettings {
                priorities: best,
                price_unit: PriceUnit::Per1000Kcal,
                is_optimized: true,
                selected_zone: None,
            },
        },
        Preset {
            id: "worst-food-ever".to_string(),
            name: "Worst Food Ever".to_string(),
            description: "Evil food leaderboard with the worst possible traits".to_string(),
            settings: PresetSettings {
                priorities: best.inverted(),
                price_unit: PriceUnit::Per1000Kcal,
                is_optimized: true,
                selected_zone: None,
            },
        },
    ]
});

/// Find a built-in preset by id (case-insensitive).
pub fn preset_by_id(id: &str) -> Option<&'static Preset> {
    let id = id.trim().to_lowercase();
    PRESETS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worst_is_inverse_of_best() {
        let best = preset_by_id("best-food-ever").unwrap();
        let worst = preset_by_id("WORST-FOOD-EVER").unwrap();
        assert_eq!(worst.settings.priorities, best.settings.priorities.inverted());
        assert_eq!(worst.settings.priorities.satiety, 0.0);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in PRESETS.iter() {
            assert!(preset.settings.priorities.validate().is_ok(), "{}", preset.id);
        }
    }
}
