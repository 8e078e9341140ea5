use std::path::Path;

use crate::engine::RankedDish;
use crate::error::Result;
use crate::models::{Metric, PriceUnit};

/// Write a ranking to a CSV file, one row per dish in rank order.
pub fn write_ranking_csv(ranked: &[&RankedDish], unit: PriceUnit, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let price_header = format!("price{}", unit.suffix().replace('/', "_per_"));
    let mut header = vec![
        "rank".to_string(),
        "dish".to_string(),
        "score".to_string(),
        "available".to_string(),
        price_header,
        "active_minutes".to_string(),
    ];
    header.extend(Metric::ALL.iter().map(|m| m.key().to_string()));
    wtr.write_record(&header)?;

    for r in ranked {
        let entry = &r.entry;
        let mut row = vec![
            r.rank.to_string(),
            r.name().to_string(),
            r.score.to_string(),
            entry.analysis.is_available().to_string(),
            entry.price.map(|p| format!("{p:.2}")).unwrap_or_default(),
            format!("{:.0}", entry.active_minutes),
        ];
        row.extend(entry.normalized.iter().map(|(_, v)| format!("{v:.2}")));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
