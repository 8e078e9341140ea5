use std::collections::HashMap;

use tracing::warn;

use crate::models::Ingredient;

/// Canonical lookup key: lowercase, trimmed, runs of non-alphanumerics
/// collapsed to a single underscore.
pub fn normalize_name(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    key
}

/// Read-only ingredient lookup keyed by [`normalize_name`].
#[derive(Debug, Clone, Default)]
pub struct IngredientIndex {
    ingredients: HashMap<String, Ingredient>,
}

impl IngredientIndex {
    /// Build the index from a raw catalog.
    ///
    /// Records whose name normalizes to nothing are skipped. On a key
    /// collision the later record wins.
    pub fn build(catalog: &[Ingredient]) -> Self {
        let mut ingredients = HashMap::with_capacity(catalog.len());
        for ingredient in catalog {
            let key = normalize_name(&ingredient.name);
            if key.is_empty() {
                warn!(raw_name = %ingredient.name, "skipping ingredient without a usable name");
                continue;
            }
            if let Some(previous) = ingredients.insert(key.clone(), ingredient.clone()) {
                warn!(
                    %key,
                    previous = %previous.name,
                    replacement = %ingredient.name,
                    "ingredient names collide after normalization; keeping the later entry"
                );
            }
        }
        Self { ingredients }
    }

    /// Look up an ingredient by any spelling of its name.
    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.get(&normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}
