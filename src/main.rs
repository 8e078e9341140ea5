use std::path::Path;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dish_ranker_rs::cli::{parse_weight, Cli, Command, RankArgs};
use dish_ranker_rs::engine::{
    analyze_all_dishes_variants, filter_ranked, score_and_sort_dishes, zone_price_index,
    EngineConfig, IngredientIndex, RankedDish,
};
use dish_ranker_rs::error::{RankError, Result};
use dish_ranker_rs::interface::{
    display_explain, display_presets, display_ranking, display_zone_prices, display_zones,
    write_ranking_csv,
};
use dish_ranker_rs::models::{OverrideField, PRESETS};
use dish_ranker_rs::state::{
    load_config, load_dishes, load_ingredients, load_preferences, save_preferences, DishCatalog,
    Preferences,
};

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.as_ref().unwrap_or(&Command::default()) {
        Command::Rank {
            args,
            top,
            search,
            csv,
        } => cmd_rank(&cli, args, *top, search.as_deref(), csv.as_deref()),
        Command::Zones => {
            display_zones();
            Ok(())
        }
        Command::Cost { dish } => cmd_cost(&cli, dish),
        Command::Explain { dish, args } => cmd_explain(&cli, dish, args),
        Command::Override {
            dish,
            metric,
            value,
            mul,
            clear,
        } => cmd_override(&cli, dish, metric, *value, *mul, *clear),
        Command::ResetOverrides { dish } => cmd_reset_overrides(&cli, dish.as_deref()),
        Command::Presets => {
            display_presets(&PRESETS);
            Ok(())
        }
    }
}

/// Catalogs and tuning needed by every ranking command.
struct Inputs {
    catalog: DishCatalog,
    index: IngredientIndex,
    config: EngineConfig,
}

fn load_inputs(cli: &Cli) -> Result<Option<Inputs>> {
    for path in [&cli.dishes, &cli.ingredients] {
        if !path.exists() {
            eprintln!("Catalog file not found: {}", path.display());
            eprintln!("Use --dishes and --ingredients to point at the catalog JSON files.");
            return Ok(None);
        }
    }

    let catalog = DishCatalog::new(load_dishes(&cli.dishes)?);
    let index = IngredientIndex::build(&load_ingredients(&cli.ingredients)?);
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    info!(
        dishes = catalog.len(),
        ingredients = index.len(),
        "catalogs loaded"
    );
    Ok(Some(Inputs {
        catalog,
        index,
        config,
    }))
}

/// Saved preferences with this run's flags layered on top. Nothing is saved.
fn resolve_preferences(path: &Path, args: &RankArgs) -> Result<Preferences> {
    let mut prefs = load_preferences(path)?;

    if let Some(preset) = &args.preset {
        prefs.apply_preset(preset)?;
    }
    if let Some(zone) = &args.zone {
        let zone = zone.trim();
        if zone.eq_ignore_ascii_case("global") {
            prefs.set_zone(None)?;
        } else {
            prefs.set_zone(Some(zone))?;
        }
    }
    if let Some(unit) = &args.unit {
        prefs.price_unit = unit.parse()?;
    }
    if args.optimized {
        prefs.is_optimized = true;
    }
    if args.normal {
        prefs.is_optimized = false;
    }
    for spec in &args.weights {
        let (metric, weight) = parse_weight(spec)?;
        prefs.priorities.set(metric, weight);
    }
    prefs.priorities.validate()?;
    if args.worst {
        prefs.priorities = prefs.priorities.inverted();
    }

    Ok(prefs)
}

/// Rank the catalog and print it.
fn cmd_rank(
    cli: &Cli,
    args: &RankArgs,
    top: Option<usize>,
    search: Option<&str>,
    csv: Option<&Path>,
) -> Result<()> {
    let Some(inputs) = load_inputs(cli)? else {
        return Ok(());
    };
    let prefs = resolve_preferences(&cli.prefs, args)?;

    let variants = analyze_all_dishes_variants(
        inputs.catalog.dishes(),
        &inputs.index,
        prefs.zone(),
        &prefs.overrides,
        &inputs.config,
    )?;
    let variant = variants.variant(prefs.variant_key());
    let ranked = score_and_sort_dishes(variant, &prefs.priorities, &inputs.config)?;

    let mut shown: Vec<&RankedDish> = match search {
        Some(query) => filter_ranked(&ranked, query),
        None => ranked.iter().collect(),
    };
    if let Some(n) = top {
        shown.truncate(n);
    }

    if prefs.priorities.is_neutral() {
        println!("All priorities are zero; dishes are ranked neutrally.");
    }
    display_ranking(&shown, variant, prefs.zone());

    if let Some(path) = csv {
        write_ranking_csv(&shown, prefs.price_unit, path)?;
        println!("Ranking written to {}", path.display());
    }

    Ok(())
}

/// Show one dish's cost in every zone.
fn cmd_cost(cli: &Cli, name: &str) -> Result<()> {
    let Some(inputs) = load_inputs(cli)? else {
        return Ok(());
    };
    let dish = inputs.catalog.find(name)?;
    let prices = zone_price_index(dish, &inputs.index);
    display_zone_prices(&dish.name, &prices);
    Ok(())
}

/// Explain how one dish's score came about.
fn cmd_explain(cli: &Cli, name: &str, args: &RankArgs) -> Result<()> {
    let Some(inputs) = load_inputs(cli)? else {
        return Ok(());
    };
    let position = inputs.catalog.find_position(name)?;
    let prefs = resolve_preferences(&cli.prefs, args)?;

    let variants = analyze_all_dishes_variants(
        inputs.catalog.dishes(),
        &inputs.index,
        prefs.zone(),
        &prefs.overrides,
        &inputs.config,
    )?;
    let variant = variants.variant(prefs.variant_key());
    let ranked = score_and_sort_dishes(variant, &prefs.priorities, &inputs.config)?;

    if let Some(entry) = ranked
        .iter()
        .find(|r| r.entry.analysis.catalog_index == position)
    {
        display_explain(entry, variant, prefs.zone());
    }
    Ok(())
}

/// Set or clear one override field for a dish.
fn cmd_override(
    cli: &Cli,
    name: &str,
    metric: &str,
    value: Option<f64>,
    mul: Option<f64>,
    clear: bool,
) -> Result<()> {
    let field = OverrideField::from_key(metric)
        .ok_or_else(|| RankError::UnknownOverrideField(metric.to_string()))?;

    if value.is_none() && mul.is_none() && !clear {
        println!("Please specify one of:");
        println!("  --value V  Replace the catalog value");
        println!("  --mul F    Multiply the catalog value");
        println!("  --clear    Remove the override");
        return Ok(());
    }

    let Some(inputs) = load_inputs(cli)? else {
        return Ok(());
    };
    let dish = inputs.catalog.find(name)?.name.clone();
    let mut prefs = load_preferences(&cli.prefs)?;

    match (value, mul) {
        (Some(v), _) => {
            prefs.set_override_value(&dish, field, v)?;
            println!("{}: {} set to {}", dish, field, v);
        }
        (None, Some(f)) => {
            prefs.set_override_multiplier(&dish, field, f)?;
            println!("{}: {} multiplied by {}", dish, field, f);
        }
        (None, None) => {
            prefs.clear_override(&dish, field);
            println!("{}: {} override cleared", dish, field);
        }
    }

    save_preferences(&cli.prefs, &prefs)?;
    println!("Preferences saved.");
    Ok(())
}

/// Drop overrides for one dish or all dishes.
fn cmd_reset_overrides(cli: &Cli, name: Option<&str>) -> Result<()> {
    let mut prefs = load_preferences(&cli.prefs)?;

    // Saved overrides may name dishes that left the catalog, so match loosely.
    let key = name.map(|n| {
        prefs
            .overrides
            .keys()
            .find(|k| k.eq_ignore_ascii_case(n.trim()))
            .cloned()
            .unwrap_or_else(|| n.to_string())
    });

    let removed = prefs.reset_overrides(key.as_deref());
    if removed == 0 {
        println!("No overrides to reset.");
        return Ok(());
    }

    save_preferences(&cli.prefs, &prefs)?;
    println!("Reset overrides for {} dish(es). Preferences saved.", removed);
    Ok(())
}
