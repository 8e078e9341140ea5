use serde::Serialize;
use tracing::debug;

use crate::engine::config::EngineConfig;
use crate::engine::constants::{cooking_label, DEFAULT_ETHICS, NORMALIZED_MAX};
use crate::engine::index::{normalize_name, IngredientIndex};
use crate::models::{CookingMode, Dish};

/// Health contribution of one ingredient after its cooking adjustment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLine {
    pub name: String,
    pub grams: f64,
    pub cooking_state: &'static str,
    pub base_health: f64,
    pub cooking_coef: f64,
    pub adjusted_health: f64,
}

/// Zone-independent raw metric values for one dish.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetrics {
    pub taste: f64,
    pub health: f64,
    pub ethics: f64,
    /// False when no ingredient carried ethics data and `ethics` is the default.
    pub has_ethics_data: bool,
    pub active_minutes_normal: f64,
    pub active_minutes_optimized: f64,
    pub passive_penalty: f64,
    pub calories: f64,
    /// `calories / weight * 1000 / 100`, zero when either side is missing.
    pub calorie_density: f64,
    pub health_breakdown: Vec<HealthLine>,
    pub missing_ingredients: Vec<String>,
}

impl RawMetrics {
    pub fn active_minutes(&self, mode: CookingMode) -> f64 {
        match mode {
            CookingMode::Normal => self.active_minutes_normal,
            CookingMode::Optimized => self.active_minutes_optimized,
        }
    }
}

/// Calorie density used by the low-calorie metric.
pub fn calorie_density(calories: f64, weight_grams: f64) -> f64 {
    if weight_grams > 0.0 && calories > 0.0 && calories.is_finite() && weight_grams.is_finite() {
        calories / weight_grams * 1000.0 / 100.0
    } else {
        0.0
    }
}

/// Compute raw metrics for a dish.
///
/// Ingredients missing from the index contribute nothing and are reported.
/// Health is a gram-weighted mean of cooking-adjusted indexes clamped to
/// 0–10; ethics averages only ingredients that carry ethics data.
pub fn analyze_dish(dish: &Dish, index: &IngredientIndex, config: &EngineConfig) -> RawMetrics {
    let mut health_weighted = 0.0;
    let mut health_grams = 0.0;
    let mut ethics_weighted = 0.0;
    let mut ethics_grams = 0.0;
    let mut health_breakdown = Vec::new();
    let mut missing_ingredients = Vec::new();

    for item in &dish.ingredients {
        let Some(ingredient) = index.get(&item.name) else {
            missing_ingredients.push(item.name.clone());
            continue;
        };
        let grams = item.effective_grams();

        if let Some(base) = ingredient.health_index.filter(|h| h.is_finite()) {
            let coef = config.cooking_coef(item.cooking_state.as_deref());
            let adjusted = (base * coef).clamp(0.0, NORMALIZED_MAX);
            health_weighted += adjusted * grams;
            health_grams += grams;
            health_breakdown.push(HealthLine {
                name: item.name.clone(),
                grams,
                cooking_state: item
                    .cooking_state
                    .as_deref()
                    .map(|s| cooking_label(&normalize_name(s)))
                    .unwrap_or("as is"),
                base_health: base,
                cooking_coef: coef,
                adjusted_health: adjusted,
            });
        }

        if let Some(ethics) = ingredient.ethics_index.filter(|e| e.is_finite()) {
            ethics_weighted += ethics.clamp(0.0, NORMALIZED_MAX) * grams;
            ethics_grams += grams;
        }
    }

    if !missing_ingredients.is_empty() {
        debug!(
            dish = %dish.name,
            missing = ?missing_ingredients,
            "ingredients missing from catalog"
        );
    }

    let health = if health_grams > 0.0 {
        (health_weighted / health_grams).clamp(0.0, NORMALIZED_MAX)
    } else {
        0.0
    };

    let has_ethics_data = ethics_grams > 0.0;
    let ethics = if has_ethics_data {
        (ethics_weighted / ethics_grams).clamp(0.0, NORMALIZED_MAX)
    } else {
        DEFAULT_ETHICS
    };

    let calories = if dish.calories.is_finite() {
        dish.calories.max(0.0)
    } else {
        0.0
    };

    RawMetrics {
        taste: if dish.taste.is_finite() { dish.taste } else { 0.0 },
        health,
        ethics,
        has_ethics_data,
        active_minutes_normal: dish.active_minutes(CookingMode::Normal),
        active_minutes_optimized: dish.active_minutes(CookingMode::Optimized),
        passive_penalty: config.passive_time_penalty(dish.passive_time_hours),
        calories,
        calorie_density: calorie_density(calories, dish.weight),
        health_breakdown,
        missing_ingredients,
    }
}
