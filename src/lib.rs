pub mod cli;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use error::{RankError, Result};
pub use models::{Dish, Ingredient, PriorityVector};
