use serde::Serialize;
use tracing::debug;

use crate::engine::constants::REFERENCE_UNIT_GRAMS;
use crate::engine::index::IngredientIndex;
use crate::models::{Dish, EconomicZone, ECONOMIC_ZONES};

/// Cost contribution of one priced ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostLine {
    pub name: String,
    pub cost: f64,
    pub grams: f64,
}

/// An ingredient amount excluded from costing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientAmount {
    pub name: String,
    pub grams: f64,
}

/// Cost of one serving of a dish in one zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishCost {
    pub total_cost: f64,
    pub breakdown: Vec<CostLine>,
    /// Priced elsewhere but not in this zone.
    pub unavailable_ingredients: Vec<IngredientAmount>,
    /// Not present in the ingredient catalog.
    pub missing_ingredients: Vec<String>,
    /// Present in the catalog but priced in no zone.
    pub missing_prices: Vec<String>,
}

impl DishCost {
    /// False when any ingredient cannot be bought in the zone.
    pub fn is_available(&self) -> bool {
        self.unavailable_ingredients.is_empty()
    }

    /// True when the dish is available and at least one ingredient was priced.
    pub fn has_price(&self) -> bool {
        self.is_available() && !self.breakdown.is_empty() && self.total_cost > 0.0
    }
}

/// Cost a dish in `zone` (or at global average prices when `None`).
pub fn calculate_dish_cost(dish: &Dish, zone: Option<&str>, index: &IngredientIndex) -> DishCost {
    calculate_dish_cost_with_reference(dish, zone, index, REFERENCE_UNIT_GRAMS)
}

/// [`calculate_dish_cost`] with an explicit reference unit in grams.
///
/// `ingredient cost = unit price × grams / reference_grams`, summed in
/// ingredient order.
pub fn calculate_dish_cost_with_reference(
    dish: &Dish,
    zone: Option<&str>,
    index: &IngredientIndex,
    reference_grams: f64,
) -> DishCost {
    let mut cost = DishCost::default();

    for item in &dish.ingredients {
        let grams = item.effective_grams();
        let Some(ingredient) = index.get(&item.name) else {
            cost.missing_ingredients.push(item.name.clone());
            continue;
        };

        if ingredient.is_unpriced() {
            cost.missing_prices.push(item.name.clone());
            continue;
        }

        match ingredient.unit_price(zone) {
            Some(unit_price) => {
                let line_cost = unit_price * grams / reference_grams;
                cost.total_cost += line_cost;
                cost.breakdown.push(CostLine {
                    name: item.name.clone(),
                    cost: line_cost,
                    grams,
                });
            }
            None => cost.unavailable_ingredients.push(IngredientAmount {
                name: item.name.clone(),
                grams,
            }),
        }
    }

    if !cost.unavailable_ingredients.is_empty() {
        debug!(
            dish = %dish.name,
            zone = zone.unwrap_or("global"),
            unavailable = cost.unavailable_ingredients.len(),
            "dish cannot be prepared in zone"
        );
    }

    cost
}

/// Cost of a dish in a single zone, `None` when unavailable there.
#[derive(Debug, Clone)]
pub struct ZonePrice {
    pub zone: &'static EconomicZone,
    pub cost: Option<DishCost>,
}

/// A dish priced across every economic zone.
#[derive(Debug, Clone)]
pub struct ZonePriceIndex {
    pub zones: Vec<ZonePrice>,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

impl ZonePriceIndex {
    /// Spread between the cheapest and dearest zone, in percent of the cheapest.
    pub fn spread_percent(&self) -> f64 {
        if self.min > 0.0 && self.max > 0.0 {
            (self.max - self.min) / self.min * 100.0
        } else {
            0.0
        }
    }

    pub fn available_count(&self) -> usize {
        self.zones.iter().filter(|z| z.cost.is_some()).count()
    }
}

/// Price a dish in every zone, for side-by-side comparison.
pub fn zone_price_index(dish: &Dish, index: &IngredientIndex) -> ZonePriceIndex {
    let zones: Vec<ZonePrice> = ECONOMIC_ZONES
        .iter()
        .map(|zone| {
            let cost = calculate_dish_cost(dish, Some(zone.id), index);
            ZonePrice {
                zone,
                cost: cost.is_available().then_some(cost),
            }
        })
        .collect();

    let available: Vec<f64> = zones
        .iter()
        .filter_map(|z| z.cost.as_ref().map(|c| c.total_cost))
        .filter(|&c| c > 0.0)
        .collect();

    let (min, max, average) = if available.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        (
            available.iter().copied().fold(f64::INFINITY, f64::min),
            available.iter().copied().fold(0.0, f64::max),
            available.iter().sum::<f64>() / available.len() as f64,
        )
    };

    ZonePriceIndex {
        zones,
        min,
        max,
        average,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{DishIngredient, Ingredient};

    fn priced(name: &str, prices: &[(&str, f64)]) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            prices: prices
                .iter()
                .map(|(z, p)| (z.to_string(), *p))
                .collect::<BTreeMap<_, _>>(),
            ..Default::default()
        }
    }

    fn dish_of(items: &[(&str, f64)]) -> Dish {
        Dish {
            name: "Test".to_string(),
            description: String::new(),
            image: None,
            ingredients: items
                .iter()
                .map(|(n, g)| DishIngredient {
                    name: n.to_string(),
                    grams: *g,
                    cooking_state: None,
                })
                .collect(),
            weight: 300.0,
            calories: 400.0,
            taste: 5.0,
            prep_time_normal: 10.0,
            cook_time_normal: 10.0,
            prep_time_optimized: None,
            cook_time_optimized: None,
            passive_time_hours: 0.0,
            comment: String::new(),
            optimized_comment: String::new(),
        }
    }

    fn sample_index() -> IngredientIndex {
        IngredientIndex::build(&[
            priced("Rice", &[("asian_rice_labor", 1.0), ("mediterranean", 2.0)]),
            priced("Chicken", &[("asian_rice_labor", 4.0), ("mediterranean", 6.0)]),
            priced("Saffron", &[("mediterranean", 5000.0)]),
            priced("Mystery Spice", &[]),
        ])
    }

    #[test]
    fn test_cost_sums_breakdown() {
        let dish = dish_of(&[("rice", 200.0), ("Chicken", 150.0)]);
        let cost = calculate_dish_cost(&dish, Some("mediterranean"), &sample_index());

        assert!((cost.total_cost - (0.4 + 0.9)).abs() < 1e-9);
        let sum: f64 = cost.breakdown.iter().map(|l| l.cost).sum();
        assert_eq!(sum, cost.total_cost);
        assert!(cost.is_available());
        assert!(cost.has_price());
    }

    #[test]
    fn test_unavailable_in_zone() {
        let dish = dish_of(&[("saffron", 1.0)]);
        let cost = calculate_dish_cost(&dish, Some("asian_rice_labor"), &sample_index());

        assert_eq!(cost.total_cost, 0.0);
        assert_eq!(
            cost.unavailable_ingredients,
            vec![IngredientAmount {
                name: "saffron".to_string(),
                grams: 1.0
            }]
        );
        assert!(!cost.is_available());
        assert!(!cost.has_price());
    }

    #[test]
    fn test_missing_ingredient_and_price_are_diagnostics() {
        let dish = dish_of(&[("rice", 100.0), ("unicorn", 50.0), ("mystery spice", 2.0)]);
        let cost = calculate_dish_cost(&dish, Some("mediterranean"), &sample_index());

        assert_eq!(cost.missing_ingredients, vec!["unicorn".to_string()]);
        assert_eq!(cost.missing_prices, vec!["mystery spice".to_string()]);
        assert!(cost.is_available());
        assert_eq!(cost.breakdown.len(), 1);
    }

    #[test]
    fn test_global_average_price() {
        let dish = dish_of(&[("rice", 1000.0)]);
        let cost = calculate_dish_cost(&dish, None, &sample_index());
        assert!((cost.total_cost - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_removing_priced_ingredient_decreases_cost() {
        let index = sample_index();
        let full = calculate_dish_cost(
            &dish_of(&[("rice", 200.0), ("chicken", 150.0)]),
            Some("asian_rice_labor"),
            &index,
        );
        let reduced =
            calculate_dish_cost(&dish_of(&[("rice", 200.0)]), Some("asian_rice_labor"), &index);
        assert!(reduced.total_cost < full.total_cost);
    }

    #[test]
    fn test_zone_price_index() {
        let dish = dish_of(&[("rice", 500.0)]);
        let prices = zone_price_index(&dish, &sample_index());

        assert_eq!(prices.zones.len(), ECONOMIC_ZONES.len());
        assert_eq!(prices.available_count(), 2);
        assert!((prices.min - 0.5).abs() < 1e-9);
        assert!((prices.max - 1.0).abs() < 1e-9);
        assert!((prices.average - 0.75).abs() < 1e-9);
        assert!((prices.spread_percent() - 100.0).abs() < 1e-9);
    }
}
