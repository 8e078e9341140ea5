use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::engine::config::EngineConfig;
use crate::engine::constants::{NEUTRAL_METRIC, NORMALIZED_MAX};
use crate::engine::cost::{calculate_dish_cost_with_reference, DishCost};
use crate::engine::index::IngredientIndex;
use crate::engine::metrics::{analyze_dish, calorie_density, RawMetrics};
use crate::engine::stats::{DatasetStats, Direction, Distribution};
use crate::error::Result;
use crate::models::{
    validate_zone, CookingMode, Dish, MetricValues, OverrideField, OverrideMap, OverrideSet,
    OverrideValue, PriceUnit, VariantKey,
};

/// Convert a per-serving price into `unit`.
///
/// Non-positive denominators fail closed to zero.
pub fn convert_price_to_unit(per_serving: f64, weight_grams: f64, calories: f64, unit: PriceUnit) -> f64 {
    let converted = match unit {
        PriceUnit::Serving => return per_serving,
        PriceUnit::PerKg if weight_grams > 0.0 => per_serving * 1000.0 / weight_grams,
        PriceUnit::Per1000Kcal if calories > 0.0 => per_serving * 1000.0 / calories,
        _ => 0.0,
    };
    if converted.is_finite() { converted } else { 0.0 }
}

/// The expensive, variant-independent analysis of one dish.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishAnalysis {
    /// Position in the input catalog, used as the ranking tie-break.
    pub catalog_index: usize,
    pub dish: Dish,
    pub cost: DishCost,
    pub metrics: RawMetrics,
    #[serde(skip)]
    pub overrides: OverrideSet,
}

impl DishAnalysis {
    pub fn name(&self) -> &str {
        &self.dish.name
    }

    pub fn is_available(&self) -> bool {
        self.cost.is_available()
    }

    pub fn effective_taste(&self) -> f64 {
        self.overrides
            .effective(OverrideField::Taste, self.metrics.taste.clamp(0.0, NORMALIZED_MAX))
    }

    pub fn effective_health(&self) -> f64 {
        self.overrides.effective(OverrideField::Health, self.metrics.health)
    }

    pub fn effective_ethics(&self) -> f64 {
        self.overrides.effective(OverrideField::Ethics, self.metrics.ethics)
    }

    pub fn effective_calories(&self) -> f64 {
        self.overrides
            .effective(OverrideField::Calories, self.metrics.calories)
    }

    pub fn effective_minutes(&self, mode: CookingMode) -> f64 {
        self.overrides
            .effective(OverrideField::Time, self.metrics.active_minutes(mode))
    }

    /// Catalog-derived per-serving price, `None` when it cannot be priced.
    pub fn base_price(&self) -> Option<f64> {
        self.cost.has_price().then_some(self.cost.total_cost)
    }

    /// Per-serving price with the user's override applied.
    ///
    /// An absolute price override makes an otherwise unpriced dish priced.
    pub fn effective_price(&self) -> Option<f64> {
        match self.overrides.get(OverrideField::Price) {
            Some(OverrideValue::Absolute(v)) => Some(v.max(0.0)),
            Some(value) => self
                .base_price()
                .map(|base| OverrideField::Price.apply(base, value)),
            None => self.base_price(),
        }
    }

    pub fn has_override(&self, field: OverrideField) -> bool {
        self.overrides.has(field)
    }
}

/// Run the per-dish analysis and zone costing once for the whole catalog.
pub fn analyze_all_dishes(
    dishes: &[Dish],
    index: &IngredientIndex,
    zone: Option<&str>,
    overrides: &OverrideMap,
    config: &EngineConfig,
) -> Vec<Arc<DishAnalysis>> {
    dishes
        .iter()
        .enumerate()
        .map(|(catalog_index, dish)| {
            Arc::new(DishAnalysis {
                catalog_index,
                dish: dish.clone(),
                cost: calculate_dish_cost_with_reference(
                    dish,
                    zone,
                    index,
                    config.reference_unit_grams,
                ),
                metrics: analyze_dish(dish, index, config),
                overrides: overrides.get(&dish.name).cloned().unwrap_or_default(),
            })
        })
        .collect()
}

/// One dish as seen through a variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDish {
    pub analysis: Arc<DishAnalysis>,
    /// Effective active minutes in the variant's mode.
    pub active_minutes: f64,
    /// Effective price in the variant's unit, `None` when unknown.
    pub price: Option<f64>,
    pub speed_percentile: f64,
    pub speed_before_penalty: f64,
    pub normalized: MetricValues,
}

impl VariantDish {
    pub fn name(&self) -> &str {
        self.analysis.name()
    }
}

/// A materialized (mode × unit) view of the analyzed catalog.
#[derive(Debug, Clone)]
pub struct Variant {
    pub key: VariantKey,
    pub dishes: Vec<VariantDish>,
    pub stats: DatasetStats,
    by_name: HashMap<String, usize>,
}

impl Variant {
    /// Find a dish by exact name or case-insensitively.
    pub fn get(&self, name: &str) -> Option<&VariantDish> {
        self.by_name
            .get(name)
            .or_else(|| self.by_name.get(&name.to_lowercase()))
            .map(|&i| &self.dishes[i])
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

fn base_unit_price(analysis: &DishAnalysis, unit: PriceUnit) -> Option<f64> {
    let base = analysis.base_price()?;
    let price = convert_price_to_unit(base, analysis.dish.weight, analysis.metrics.calories, unit);
    (unit == PriceUnit::Serving || price > 0.0).then_some(price)
}

fn effective_unit_price(analysis: &DishAnalysis, unit: PriceUnit) -> Option<f64> {
    let per_serving = analysis.effective_price()?;
    let calories = analysis.effective_calories();
    let price = convert_price_to_unit(per_serving, analysis.dish.weight, calories, unit);
    let convertible = match unit {
        PriceUnit::Serving => true,
        PriceUnit::PerKg => analysis.dish.weight > 0.0,
        PriceUnit::Per1000Kcal => calories > 0.0,
    };
    convertible.then_some(price)
}

/// Build one variant from the shared analysis.
///
/// Distributions come from catalog-derived values only, so a dish's
/// overrides move its own normalized values without shifting anyone else's.
pub fn materialize_variant(
    analyses: &[Arc<DishAnalysis>],
    key: VariantKey,
) -> Variant {
    let stats = DatasetStats {
        cost: Distribution::new(
            analyses.iter().filter_map(|a| base_unit_price(a, key.unit)),
            Direction::LowerIsBetter,
        ),
        time: Distribution::new(
            analyses.iter().map(|a| a.metrics.active_minutes(key.mode)),
            Direction::LowerIsBetter,
        ),
        satiety: Distribution::new(
            analyses
                .iter()
                .map(|a| a.metrics.calories)
                .filter(|&c| c > 0.0),
            Direction::HigherIsBetter,
        ),
        calorie_density: Distribution::new(
            analyses
                .iter()
                .map(|a| a.metrics.calorie_density)
                .filter(|&d| d > 0.0),
            Direction::LowerIsBetter,
        ),
    };

    let dishes: Vec<VariantDish> = analyses
        .iter()
        .map(|analysis| {
            let active_minutes = analysis.effective_minutes(key.mode);
            let price = effective_unit_price(analysis, key.unit);

            let priced_by_user = matches!(
                analysis.overrides.get(OverrideField::Price),
                Some(OverrideValue::Absolute(_))
            );
            let cheapness = match price {
                _ if !analysis.is_available() && !priced_by_user => 0.0,
                Some(p) => stats.cost.normalized(p),
                None => NEUTRAL_METRIC,
            };

            let speed_percentile = stats.time.percentile(active_minutes);
            let speed_before_penalty = speed_percentile / 10.0;
            let speed = (speed_before_penalty - analysis.metrics.passive_penalty)
                .clamp(0.0, NORMALIZED_MAX);

            let calories = analysis.effective_calories();
            let satiety = if calories > 0.0 {
                stats.satiety.normalized(calories)
            } else {
                NEUTRAL_METRIC
            };
            let density = calorie_density(calories, analysis.dish.weight);
            let low_calorie = if density > 0.0 {
                stats.calorie_density.normalized(density)
            } else {
                NEUTRAL_METRIC
            };

            let normalized = MetricValues {
                taste: analysis.effective_taste().clamp(0.0, NORMALIZED_MAX),
                health: analysis.effective_health().clamp(0.0, NORMALIZED_MAX),
                cheapness,
                speed,
                satiety,
                low_calorie,
                ethics: analysis.effective_ethics().clamp(0.0, NORMALIZED_MAX),
            };

            VariantDish {
                analysis: Arc::clone(analysis),
                active_minutes,
                price,
                speed_percentile,
                speed_before_penalty,
                normalized,
            }
        })
        .collect();

    let mut by_name = HashMap::with_capacity(dishes.len() * 2);
    for (i, dish) in dishes.iter().enumerate() {
        by_name.insert(dish.name().to_lowercase(), i);
        by_name.insert(dish.name().to_string(), i);
    }

    Variant {
        key,
        dishes,
        stats,
        by_name,
    }
}

/// All six variants for one (zone, overrides) pair.
#[derive(Debug, Clone)]
pub struct AnalysisVariants {
    pub zone: Option<String>,
    pub analyses: Vec<Arc<DishAnalysis>>,
    variants: BTreeMap<VariantKey, Variant>,
}

impl AnalysisVariants {
    pub fn variant(&self, key: VariantKey) -> &Variant {
        // Every key is inserted by `analyze_all_dishes_variants`.
        &self.variants[&key]
    }

    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.values()
    }
}

/// Analyze the catalog once and materialize every (mode × unit) variant.
///
/// Fails fast on an unknown zone id or invalid configuration input; data
/// gaps in the catalogs are reported per dish instead.
pub fn analyze_all_dishes_variants(
    dishes: &[Dish],
    index: &IngredientIndex,
    zone: Option<&str>,
    overrides: &OverrideMap,
    config: &EngineConfig,
) -> Result<AnalysisVariants> {
    validate_zone(zone)?;
    let started = Instant::now();

    let analyses = analyze_all_dishes(dishes, index, zone, overrides, config);
    let variants: BTreeMap<VariantKey, Variant> = VariantKey::all()
        .map(|key| (key, materialize_variant(&analyses, key)))
        .collect();

    let unavailable = analyses.iter().filter(|a| !a.is_available()).count();
    info!(
        dishes = analyses.len(),
        zone = zone.unwrap_or("global"),
        unavailable,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "materialized ranking variants"
    );

    Ok(AnalysisVariants {
        zone: zone.map(str::to_string),
        analyses,
        variants,
    })
}

struct CachedVariants {
    zone: Option<String>,
    overrides: OverrideMap,
    variants: AnalysisVariants,
}

/// Caller-owned memo of the last six-variant computation.
///
/// Recomputes only when the zone or overrides differ from the cached inputs.
#[derive(Default)]
pub struct VariantCache {
    current: Option<CachedVariants>,
    computations: usize,
}

impl VariantCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the requested variant, computing all six if inputs changed.
    pub fn get_or_compute(
        &mut self,
        dishes: &[Dish],
        index: &IngredientIndex,
        zone: Option<&str>,
        overrides: &OverrideMap,
        config: &EngineConfig,
        key: VariantKey,
    ) -> Result<&Variant> {
        let cached = match self.current.take() {
            Some(cached) if cached.zone.as_deref() == zone && &cached.overrides == overrides => {
                cached
            }
            _ => {
                debug!(%key, "variant cache miss; recomputing all variants");
                let variants = analyze_all_dishes_variants(dishes, index, zone, overrides, config)?;
                self.computations += 1;
                CachedVariants {
                    zone: zone.map(str::to_string),
                    overrides: overrides.clone(),
                    variants,
                }
            }
        };
        Ok(self.current.insert(cached).variants.variant(key))
    }

    /// Number of full six-variant computations performed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{DishIngredient, Ingredient};

    fn rice() -> Ingredient {
        Ingredient {
            name: "Rice".to_string(),
            health_index: Some(6.0),
            ethics_index: Some(7.0),
            ethics_reason: String::new(),
            prices: BTreeMap::from([
                ("mediterranean".to_string(), 2.0),
                ("oceanic".to_string(), 3.0),
            ]),
        }
    }

    fn saffron() -> Ingredient {
        Ingredient {
            name: "Saffron".to_string(),
            health_index: Some(7.0),
            ethics_index: None,
            ethics_reason: String::new(),
            prices: BTreeMap::from([("mediterranean".to_string(), 5000.0)]),
        }
    }

    fn dish(name: &str, grams: f64, minutes: f64, extra: Option<(&str, f64)>) -> Dish {
        let mut ingredients = vec![DishIngredient {
            name: "rice".to_string(),
            grams,
            cooking_state: Some("boiled".to_string()),
        }];
        if let Some((n, g)) = extra {
            ingredients.push(DishIngredient {
                name: n.to_string(),
                grams: g,
                cooking_state: None,
            });
        }
        Dish {
            name: name.to_string(),
            description: String::new(),
            image: None,
            ingredients,
            weight: grams,
            calories: grams * 1.3,
            taste: 6.0,
            prep_time_normal: minutes,
            cook_time_normal: 0.0,
            prep_time_optimized: None,
            cook_time_optimized: None,
            passive_time_hours: 0.0,
            comment: String::new(),
            optimized_comment: String::new(),
        }
    }

    fn catalog() -> Vec<Dish> {
        vec![
            dish("Small Rice", 100.0, 10.0, None),
            dish("Medium Rice", 200.0, 20.0, None),
            dish("Saffron Rice", 300.0, 30.0, Some(("saffron", 1.0))),
        ]
    }

    fn index() -> IngredientIndex {
        IngredientIndex::build(&[rice(), saffron()])
    }

    #[test]
    fn test_convert_price_to_unit() {
        assert_eq!(convert_price_to_unit(3.0, 500.0, 600.0, PriceUnit::Serving), 3.0);
        assert_eq!(convert_price_to_unit(3.0, 500.0, 600.0, PriceUnit::PerKg), 6.0);
        assert_eq!(convert_price_to_unit(3.0, 500.0, 600.0, PriceUnit::Per1000Kcal), 5.0);
        assert_eq!(convert_price_to_unit(3.0, 0.0, 600.0, PriceUnit::PerKg), 0.0);
        assert_eq!(convert_price_to_unit(3.0, 500.0, -1.0, PriceUnit::Per1000Kcal), 0.0);
    }

    #[test]
    fn test_six_variants_share_one_analysis() {
        let variants = analyze_all_dishes_variants(
            &catalog(),
            &index(),
            Some("mediterranean"),
            &OverrideMap::new(),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(variants.variants().count(), 6);
        let a = variants.variant(VariantKey::new(CookingMode::Normal, PriceUnit::Serving));
        let b = variants.variant(VariantKey::new(CookingMode::Optimized, PriceUnit::PerKg));
        for (x, y) in a.dishes.iter().zip(&b.dishes) {
            assert!(Arc::ptr_eq(&x.analysis, &y.analysis));
        }
    }

    #[test]
    fn test_duplicate_names_resolve_to_last() {
        let dishes = vec![
            dish("Rice Bowl", 100.0, 10.0, None),
            dish("Rice Bowl", 200.0, 20.0, None),
        ];
        let variants = analyze_all_dishes_variants(
            &dishes,
            &index(),
            Some("mediterranean"),
            &OverrideMap::new(),
            &EngineConfig::default(),
        )
        .unwrap();

        let variant = variants.variant(VariantKey::new(CookingMode::Normal, PriceUnit::Serving));
        assert_eq!(variant.len(), 2);
        assert_eq!(variant.get("Rice Bowl").unwrap().active_minutes, 20.0);
        assert_eq!(variant.get("rice bowl").unwrap().active_minutes, 20.0);
        assert_eq!(variant.get("RICE BOWL").unwrap().active_minutes, 20.0);
    }

    #[test]
    fn test_unknown_zone_fails_fast() {
        let result = analyze_all_dishes_variants(
            &catalog(),
            &index(),
            Some("atlantis"),
            &OverrideMap::new(),
            &EngineConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unavailable_dish_gets_zero_cheapness() {
        let variants = analyze_all_dishes_variants(
            &catalog(),
            &index(),
            Some("oceanic"),
            &OverrideMap::new(),
            &EngineConfig::default(),
        )
        .unwrap();
        let variant = variants.variant(VariantKey::new(CookingMode::Normal, PriceUnit::Serving));
        let saffron_rice = variant.get("saffron rice").unwrap();
        assert!(!saffron_rice.analysis.is_available());
        assert_eq!(saffron_rice.normalized.cheapness, 0.0);
        assert_eq!(variant.stats.cost.len(), 2);
    }

    #[test]
    fn test_override_does_not_shift_other_dishes() {
        let base = analyze_all_dishes_variants(
            &catalog(),
            &index(),
            Some("mediterranean"),
            &OverrideMap::new(),
            &EngineConfig::default(),
        )
        .unwrap();

        let mut time_override = OverrideSet::new();
        time_override.set_absolute(OverrideField::Time, 1.0).unwrap();
        let overrides = OverrideMap::from([("Saffron Rice".to_string(), time_override)]);
        let overridden = analyze_all_dishes_variants(
            &catalog(),
            &index(),
            Some("mediterranean"),
            &overrides,
            &EngineConfig::default(),
        )
        .unwrap();

        let key = VariantKey::new(CookingMode::Normal, PriceUnit::Serving);
        let before = base.variant(key);
        let after = overridden.variant(key);

        assert_eq!(before.get("Small Rice").unwrap().normalized, after.get("Small Rice").unwrap().normalized);
        assert_eq!(before.get("Medium Rice").unwrap().normalized, after.get("Medium Rice").unwrap().normalized);
        assert_eq!(before.get("Saffron Rice").unwrap().normalized.speed, 0.0);
        assert_eq!(after.get("Saffron Rice").unwrap().normalized.speed, 10.0);
    }

    #[test]
    fn test_cache_recomputes_only_on_input_change() {
        let dishes = catalog();
        let index = index();
        let config = EngineConfig::default();
        let mut cache = VariantCache::new();
        let overrides = OverrideMap::new();

        for key in VariantKey::all() {
            let variant = cache
                .get_or_compute(&dishes, &index, Some("mediterranean"), &overrides, &config, key)
                .unwrap();
            assert_eq!(variant.key, key);
        }
        assert_eq!(cache.computations(), 1);

        let key = VariantKey::new(CookingMode::Normal, PriceUnit::Serving);
        cache
            .get_or_compute(&dishes, &index, Some("oceanic"), &overrides, &config, key)
            .unwrap();
        assert_eq!(cache.computations(), 2);

        let mut changed = OverrideMap::new();
        let mut set = OverrideSet::new();
        set.set_multiplier(OverrideField::Taste, 1.5).unwrap();
        changed.insert("Small Rice".to_string(), set);
        cache
            .get_or_compute(&dishes, &index, Some("oceanic"), &changed, &config, key)
            .unwrap();
        assert_eq!(cache.computations(), 3);
    }
}
