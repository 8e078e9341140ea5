mod catalog;
mod persistence;
mod preferences;

pub use catalog::DishCatalog;
pub use persistence::{
    load_config, load_dishes, load_ingredients, load_preferences, save_preferences,
};
pub use preferences::Preferences;
