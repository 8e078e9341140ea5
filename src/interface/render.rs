use crate::engine::{DishAnalysis, RankedDish, Variant, ZonePriceIndex};
use crate::models::{OverrideField, Preset, PriceUnit, ECONOMIC_ZONES};

fn format_price(price: Option<f64>, unit: PriceUnit) -> String {
    match price {
        Some(p) => format!("{p:.2}{}", unit.suffix()),
        None => "n/a".to_string(),
    }
}

fn zone_label(zone: Option<&str>) -> String {
    match zone.and_then(crate::models::zone_by_id) {
        Some(z) => format!("{} {}", z.emoji, z.name),
        None => "Global average".to_string(),
    }
}

fn override_marks(analysis: &DishAnalysis) -> String {
    let fields: Vec<&str> = OverrideField::ALL
        .into_iter()
        .filter(|f| analysis.has_override(*f))
        .map(OverrideField::key)
        .collect();
    if fields.is_empty() {
        String::new()
    } else {
        format!("  [override: {}]", fields.join(", "))
    }
}

/// Display a ranking as an aligned table.
pub fn display_ranking(ranked: &[&RankedDish], variant: &Variant, zone: Option<&str>) {
    if ranked.is_empty() {
        println!("No dishes to rank.");
        return;
    }

    println!();
    println!(
        "=== Ranking: {} | {} ===",
        zone_label(zone),
        variant.key
    );
    println!();

    let max_name_len = ranked.iter().map(|r| r.name().len()).max().unwrap_or(10);

    for r in ranked {
        let entry = &r.entry;
        let price = if entry.analysis.is_available() {
            format_price(entry.price, variant.key.unit)
        } else {
            "unavailable".to_string()
        };

        println!(
            "{:>3}. {:<width$}  {:>3} | {:>16} | {:>4.0} min{}",
            r.rank,
            r.name(),
            r.score,
            price,
            entry.active_minutes,
            override_marks(&entry.analysis),
            width = max_name_len
        );
    }

    let unavailable = ranked
        .iter()
        .filter(|r| !r.entry.analysis.is_available())
        .count();

    println!();
    println!("--- Summary ---");
    println!("Dishes shown: {}", ranked.len());
    if unavailable > 0 {
        println!("Unavailable in zone: {}", unavailable);
    }
    println!();
}

/// Display the economic zones.
pub fn display_zones() {
    println!();
    println!("=== Economic Zones ===");
    println!();
    for zone in ECONOMIC_ZONES.iter() {
        println!("  {} {:<24} {}", zone.emoji, zone.id, zone.name);
    }
    println!();
}

/// Display built-in presets.
pub fn display_presets(presets: &[Preset]) {
    println!();
    println!("=== Presets ===");
    println!();
    for preset in presets {
        let weights: Vec<String> = preset
            .settings
            .priorities
            .active()
            .into_iter()
            .map(|(m, w)| format!("{}={:+}", m.key(), w))
            .collect();
        println!("  {:<18} {}", preset.id, preset.description);
        println!("  {:<18} {}", "", weights.join(" "));
    }
    println!();
}

/// Display a dish's cost in every zone.
pub fn display_zone_prices(dish_name: &str, prices: &ZonePriceIndex) {
    println!();
    println!("=== Zone prices: {} ===", dish_name);
    println!();

    for zp in &prices.zones {
        match &zp.cost {
            Some(cost) => println!(
                "  {} {:<34} {:>8.2}",
                zp.zone.emoji, zp.zone.name, cost.total_cost
            ),
            None => println!("  {} {:<34} {:>8}", zp.zone.emoji, zp.zone.name, "-"),
        }
    }

    println!();
    if prices.available_count() == 0 {
        println!("Not available in any zone.");
    } else {
        println!(
            "Min {:.2} | Max {:.2} | Avg {:.2} | Spread {:.0}%",
            prices.min,
            prices.max,
            prices.average,
            prices.spread_percent()
        );
    }
    println!();
}

/// Display how a dish's score was put together.
pub fn display_explain(ranked: &RankedDish, variant: &Variant, zone: Option<&str>) {
    let entry = &ranked.entry;
    let analysis = &entry.analysis;
    let metrics = &analysis.metrics;

    println!();
    println!(
        "=== {} (#{} of {}, score {}) ===",
        ranked.name(),
        ranked.rank,
        variant.len(),
        ranked.score
    );
    println!("{} | {}", zone_label(zone), variant.key);
    println!(
        "Serving: {:.0} g ({:.0} g of ingredients), {:.0} kcal",
        analysis.dish.weight,
        analysis.dish.ingredient_grams(),
        analysis.effective_calories()
    );
    println!();

    println!("Health by ingredient:");
    for line in &metrics.health_breakdown {
        println!(
            "  {:<20} {:>5.0} g  {:<10} {:>4.1} x {:.2} = {:>4.1}",
            line.name,
            line.grams,
            line.cooking_state,
            line.base_health,
            line.cooking_coef,
            line.adjusted_health
        );
    }
    if !metrics.has_ethics_data {
        println!("  (no ethics data; ethics is neutral)");
    }
    println!();

    let cost = &analysis.cost;
    println!("Cost per serving:");
    for line in &cost.breakdown {
        println!("  {:<20} {:>5.0} g  {:>8.2}", line.name, line.grams, line.cost);
    }
    for item in &cost.unavailable_ingredients {
        println!("  {:<20} {:>5.0} g  unavailable in zone", item.name, item.grams);
    }
    for name in &cost.missing_prices {
        println!("  {:<20} no price data", name);
    }
    for name in &cost.missing_ingredients {
        println!("  {:<20} not in ingredient catalog", name);
    }
    println!(
        "  Price: {}",
        format_price(entry.price, variant.key.unit)
    );
    println!();

    println!(
        "Time: {:.0} min active, {:.1} h passive (penalty {:.1})",
        entry.active_minutes, analysis.dish.passive_time_hours, metrics.passive_penalty
    );
    println!(
        "Speed: percentile {:.0} -> {:.1} before penalty -> {:.1}",
        entry.speed_percentile, entry.speed_before_penalty, entry.normalized.speed
    );
    println!();

    println!("Normalized metrics:");
    for (metric, value) in entry.normalized.iter() {
        println!("  {:<12} {:>5.2}", metric.label(), value);
    }
    println!();

    if ranked.contributions.is_empty() {
        println!("No active priorities; ranked neutrally.");
    } else {
        println!("Contributions:");
        for c in &ranked.contributions {
            println!(
                "  {:<12} weight {:>+5.1}  value {:>5.2}  -> {:>6.2}",
                c.metric.label(),
                c.weight,
                c.oriented,
                c.weighted
            );
        }
    }
    println!("{}", override_marks(analysis).trim());
    println!();
}
