use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{RankError, Result};
use crate::models::Dish;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// The dish catalog with case-insensitive lookup by name.
///
/// Keeps catalog order, which the ranking uses as its tie-break.
pub struct DishCatalog {
    dishes: Vec<Dish>,
    by_key: HashMap<String, usize>,
}

impl DishCatalog {
    /// Build a catalog. Later duplicates (by lowercase name) shadow earlier ones in lookups.
    pub fn new(dishes: Vec<Dish>) -> Self {
        let by_key = dishes
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.trim().to_lowercase(), i))
            .collect();
        Self { dishes, by_key }
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Catalog position of a dish by name (case-insensitive).
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_key.get(&name.trim().to_lowercase()).copied()
    }

    /// Get a dish by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Dish> {
        self.position(name).map(|i| &self.dishes[i])
    }

    /// Closest dish name by Jaro-Winkler similarity, if any is close enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        self.dishes
            .iter()
            .map(|d| (d, jaro_winkler(&d.name.to_lowercase(), &needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(d, _)| d.name.as_str())
    }

    /// Like [`DishCatalog::position`], but a miss becomes
    /// [`RankError::DishNotFound`] carrying the closest match.
    pub fn find_position(&self, name: &str) -> Result<usize> {
        self.position(name).ok_or_else(|| RankError::DishNotFound {
            name: name.to_string(),
            suggestion: self.suggest(name).map(str::to_string),
        })
    }

    pub fn find(&self, name: &str) -> Result<&Dish> {
        self.find_position(name).map(|i| &self.dishes[i])
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}
