pub mod export;
pub mod render;

pub use export::write_ranking_csv;
pub use render::{
    display_explain, display_presets, display_ranking, display_zone_prices, display_zones,
};
