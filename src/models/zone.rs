use std::sync::LazyLock;

use serde::Serialize;

use crate::error::{RankError, Result};

/// An economic pricing region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicZone {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    /// Map fill colour.
    pub color: &'static str,
}

/// The fixed set of economic zones, in map order.
pub static ECONOMIC_ZONES: LazyLock<Vec<EconomicZone>> = LazyLock::new(|| {
    vec![
        zone("east_euro_agrarian", "Eastern Europe (agrarian)", "🌾", "#d97706"),
        zone("west_eu_industrial", "Western Europe (industrial)", "🏭", "#2563eb"),
        zone("northern_import", "Nordics (import-dependent)", "❄️", "#0891b2"),
        zone("mediterranean", "Mediterranean", "🌊", "#0d9488"),
        zone("north_american", "North America", "🏛️", "#7c3aed"),
        zone("latam_agrarian", "Latin America (agrarian)", "🌱", "#16a34a"),
        zone("asian_rice_labor", "South & Southeast Asia", "🍚", "#dc2626"),
        zone("developed_asia", "Developed Asia", "🏙️", "#db2777"),
        zone("mena_arid", "Middle East & North Africa", "🏜️", "#ca8a04"),
        zone("oceanic", "Oceania", "📍", "#0284c7"),
        zone("subsaharan_subsistence", "Sub-Saharan Africa", "🌍", "#65a30d"),
    ]
});

fn zone(
    id: &'static str,
    name: &'static str,
    emoji: &'static str,
    color: &'static str,
) -> EconomicZone {
    EconomicZone {
        id,
        name,
        emoji,
        color,
    }
}

/// Look up a zone by id.
pub fn zone_by_id(id: &str) -> Option<&'static EconomicZone> {
    ECONOMIC_ZONES.iter().find(|z| z.id == id)
}

/// Validate an optional zone selection at the engine boundary.
pub fn validate_zone(zone: Option<&str>) -> Result<()> {
    match zone {
        Some(id) if zone_by_id(id).is_none() => Err(RankError::UnknownZone(id.to_string())),
        _ => Ok(()),
    }
}
