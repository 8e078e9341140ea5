use serde::{Deserialize, Serialize};

use crate::models::CookingMode;

/// One ingredient reference inside a dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishIngredient {
    pub name: String,

    #[serde(alias = "g", default)]
    pub grams: f64,

    /// Cooking state such as `raw`, `boiled` or `fried`.
    #[serde(alias = "state", alias = "cookingState", default)]
    pub cooking_state: Option<String>,
}

impl DishIngredient {
    /// Grams usable for arithmetic: non-finite or negative amounts count as zero.
    #[inline]
    pub fn effective_grams(&self) -> f64 {
        if self.grams.is_finite() && self.grams > 0.0 {
            self.grams
        } else {
            0.0
        }
    }
}

/// A dish catalog entry. Never mutated by the engine.
///
/// Times are in minutes except `passive_time_hours`. Taste uses the 0–10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub ingredients: Vec<DishIngredient>,

    /// Serving weight in grams.
    #[serde(default)]
    pub weight: f64,

    /// Calories per serving.
    #[serde(default)]
    pub calories: f64,

    #[serde(alias = "taste_score", default)]
    pub taste: f64,

    #[serde(default)]
    pub prep_time_normal: f64,

    #[serde(default)]
    pub cook_time_normal: f64,

    #[serde(default)]
    pub prep_time_optimized: Option<f64>,

    #[serde(default)]
    pub cook_time_optimized: Option<f64>,

    #[serde(default)]
    pub passive_time_hours: f64,

    #[serde(default)]
    pub comment: String,

    #[serde(default)]
    pub optimized_comment: String,
}

impl Dish {
    /// Active (attended) minutes for a cooking mode.
    ///
    /// Optimized times fall back to the normal ones when absent.
    pub fn active_minutes(&self, mode: CookingMode) -> f64 {
        let (prep, cook) = match mode {
            CookingMode::Normal => (self.prep_time_normal, self.cook_time_normal),
            CookingMode::Optimized => (
                self.prep_time_optimized.unwrap_or(self.prep_time_normal),
                self.cook_time_optimized.unwrap_or(self.cook_time_normal),
            ),
        };
        non_negative(prep) + non_negative(cook)
    }

    /// Sum of ingredient grams.
    pub fn ingredient_grams(&self) -> f64 {
        self.ingredients.iter().map(|i| i.effective_grams()).sum()
    }

    /// Case-insensitive name or description match used by search.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[inline]
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
