use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RankError;

/// Cooking mode: the catalog's standard times or its time-optimized ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CookingMode {
    Normal,
    Optimized,
}

impl CookingMode {
    pub const ALL: [CookingMode; 2] = [CookingMode::Normal, CookingMode::Optimized];

    pub fn from_optimized(optimized: bool) -> Self {
        if optimized {
            CookingMode::Optimized
        } else {
            CookingMode::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CookingMode::Normal => "normal",
            CookingMode::Optimized => "optimized",
        }
    }
}

/// Unit in which dish prices are compared.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PriceUnit {
    #[serde(rename = "serving")]
    Serving,
    #[serde(rename = "per1kg")]
    PerKg,
    #[default]
    #[serde(rename = "per1000kcal")]
    Per1000Kcal,
}

impl PriceUnit {
    pub const ALL: [PriceUnit; 3] = [PriceUnit::Serving, PriceUnit::PerKg, PriceUnit::Per1000Kcal];

    pub fn as_str(self) -> &'static str {
        match self {
            PriceUnit::Serving => "serving",
            PriceUnit::PerKg => "per1kg",
            PriceUnit::Per1000Kcal => "per1000kcal",
        }
    }

    /// Suffix for displayed prices.
    pub fn suffix(self) -> &'static str {
        match self {
            PriceUnit::Serving => "/serving",
            PriceUnit::PerKg => "/kg",
            PriceUnit::Per1000Kcal => "/1000kcal",
        }
    }
}

impl FromStr for PriceUnit {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "serving" | "perserving" | "per-serving" => Ok(PriceUnit::Serving),
            "per1kg" | "kg" | "per-kg" => Ok(PriceUnit::PerKg),
            "per1000kcal" | "kcal" | "per-1000kcal" => Ok(PriceUnit::Per1000Kcal),
            other => Err(RankError::UnknownPriceUnit(other.to_string())),
        }
    }
}

/// One (cooking mode × price unit) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    pub mode: CookingMode,
    pub unit: PriceUnit,
}

impl VariantKey {
    pub fn new(mode: CookingMode, unit: PriceUnit) -> Self {
        Self { mode, unit }
    }

    /// All six keys, mode-major.
    pub fn all() -> impl Iterator<Item = VariantKey> {
        CookingMode::ALL
            .into_iter()
            .flat_map(|mode| PriceUnit::ALL.into_iter().map(move |unit| VariantKey { mode, unit }))
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.mode.as_str(), self.unit.as_str())
    }
}
