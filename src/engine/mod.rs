pub mod config;
pub mod constants;
pub mod cost;
pub mod index;
pub mod metrics;
pub mod scoring;
pub mod stats;
pub mod variants;

pub use config::{EngineConfig, PenaltyStep};
pub use constants::*;
pub use cost::{
    calculate_dish_cost, calculate_dish_cost_with_reference, zone_price_index, CostLine, DishCost,
    IngredientAmount, ZonePrice, ZonePriceIndex,
};
pub use index::{normalize_name, IngredientIndex};
pub use metrics::{analyze_dish, calorie_density, HealthLine, RawMetrics};
pub use scoring::{filter_ranked, score_and_sort_dishes, score_dish, Contribution, RankedDish};
pub use stats::{DatasetStats, Direction, Distribution};
pub use variants::{
    analyze_all_dishes, analyze_all_dishes_variants, convert_price_to_unit, materialize_variant,
    AnalysisVariants, DishAnalysis, Variant, VariantCache, VariantDish,
};
