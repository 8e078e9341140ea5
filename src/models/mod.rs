pub mod dish;
pub mod ingredient;
pub mod metric;
pub mod overrides;
pub mod preset;
pub mod priorities;
pub mod variant;
pub mod zone;

pub use dish::{Dish, DishIngredient};
pub use ingredient::Ingredient;
pub use metric::{Metric, MetricValues};
pub use overrides::{OverrideField, OverrideMap, OverrideSet, OverrideValue, MULTIPLIER_EPSILON};
pub use preset::{preset_by_id, Preset, PresetSettings, PRESETS};
pub use priorities::{PriorityVector, PRIORITY_LIMIT};
pub use variant::{CookingMode, PriceUnit, VariantKey};
pub use zone::{validate_zone, zone_by_id, EconomicZone, ECONOMIC_ZONES};
