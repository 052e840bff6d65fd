//! Order command - compute the cheapest combine order for named
//! enchantments, from arguments or interactively.

use crate::cli::style::Stylize;
use anstream::println;
use anvil_order::catalog::{Catalog, JsonCatalog};
use anvil_order::error::{Error, Result};
use anvil_order::i18n::{self, t, t_with_args};
use anvil_order::order::{OrderingPlan, ScheduleOptions, schedule, schedule_with};
use anvil_order::types::{Enchantment, parse_roman_numeral};
use clap::Args;
use dialoguer::Input;
use regex::Regex;
use std::sync::OnceLock;

/// Arguments for `anvil order`.
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Enchantment names to combine onto one item
    #[arg(required = true, value_name = "ENCHANTMENT")]
    pub enchantments: Vec<String>,

    /// Level overrides, matched to enchantments by position
    #[arg(short, long, num_args = 0.., value_name = "LEVEL")]
    pub level: Vec<u32>,

    /// Explicit weights, matched by position; with a weight the name need
    /// not exist in the catalog
    #[arg(short, long, num_args = 0.., value_name = "WEIGHT")]
    pub weight: Vec<u32>,

    /// Penalty already on the item from earlier anvil work
    #[arg(short, long, default_value_t = 0, value_name = "PENALTY")]
    pub penalty: u32,

    /// Print the best plan even when it breaks the anvil's hard caps
    #[arg(long)]
    pub tolerate_caps: bool,
}

/// Run the order command.
pub fn run_order(args: &OrderArgs) -> Result<()> {
    let catalog = JsonCatalog::for_locale(&i18n::current_locale())?;
    let wanted = resolve_wanted(&catalog, &args.enchantments, &args.level, &args.weight)?;

    println!("{}", t("order.start").emphasis());
    println!("*****************");

    let plan = schedule_with(
        &wanted,
        &ScheduleOptions {
            initial_penalty: args.penalty,
            tolerate_caps: args.tolerate_caps,
        },
    )?;
    print_plan(&plan);
    Ok(())
}

/// Resolve names against the catalog, honoring positional level and
/// weight overrides: a level re-levels the catalog entry; a weight makes
/// the entry ad-hoc, so the name need not exist at all.
fn resolve_wanted(
    catalog: &JsonCatalog,
    names: &[String],
    levels: &[u32],
    weights: &[u32],
) -> Result<Vec<Enchantment>> {
    if levels.len() > names.len() {
        return Err(Error::Arguments(format!(
            "{} levels given for {} enchantments",
            levels.len(),
            names.len()
        )));
    }
    if weights.len() > names.len() {
        return Err(Error::Arguments(format!(
            "{} weights given for {} enchantments",
            weights.len(),
            names.len()
        )));
    }
    if levels.contains(&0) || weights.contains(&0) {
        return Err(Error::Arguments(
            "levels and weights must be at least 1".to_string(),
        ));
    }

    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let level = levels.get(index).copied();
            if let Some(weight) = weights.get(index).copied() {
                return Ok(Enchantment::new(name.clone(), level.unwrap_or(1), weight));
            }
            let entry = catalog
                .find(name)
                .ok_or_else(|| Error::EnchantmentNotFound(name.clone()))?;
            Ok(level.map_or_else(|| entry.enchantment(), |level| entry.enchantment_at(level)))
        })
        .collect()
}

/// Interactive mode: gather a wanted list one name at a time, then order
/// it. `c` enters a custom enchantment, `q` finishes.
pub fn run_interactive() -> Result<()> {
    let catalog = JsonCatalog::for_locale(&i18n::current_locale())?;
    let mut wanted: Vec<Enchantment> = Vec::new();

    println!("{}", t("order.interactive_help").muted());
    loop {
        let text: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;
        let text = text.trim().to_string();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("q") {
            break;
        }
        if text.eq_ignore_ascii_case("c") {
            let custom = prompt_custom()?;
            println!(
                "{}",
                t_with_args("order.added", &[("name", &custom.name)]).success()
            );
            wanted.push(custom);
            continue;
        }
        match parse_entry(&catalog, &text) {
            Ok(enchantment) => {
                println!(
                    "{}",
                    t_with_args("order.added", &[("name", &enchantment.name)]).success()
                );
                wanted.push(enchantment);
            }
            Err(e) => println!("{}", e.to_string().warn()),
        }
    }

    if wanted.is_empty() {
        println!("{}", t("order.cancelled").muted());
        return Ok(());
    }

    println!("{}", t("order.start").emphasis());
    println!("*****************");
    match schedule(&wanted, 0) {
        Ok(plan) => print_plan(&plan),
        Err(e) => println!("{}", e.to_string().warn()),
    }
    Ok(())
}

/// Print a plan plus any advisory cap warnings it carries.
fn print_plan(plan: &OrderingPlan) {
    println!("{plan}");
    if plan.is_too_expensive() {
        println!("{}", t("order.too_expensive").warn());
    }
    if plan.is_too_many_penalty() {
        println!("{}", t("order.too_many_penalty").warn());
    }
}

fn prompt_custom() -> Result<Enchantment> {
    let name: String = Input::new()
        .with_prompt(t("order.input_name"))
        .interact_text()
        .map_err(input_error)?;
    let level: u32 = Input::new()
        .with_prompt(t("order.input_level"))
        .validate_with(|value: &u32| {
            if *value >= 1 {
                Ok(())
            } else {
                Err("level must be at least 1")
            }
        })
        .interact_text()
        .map_err(input_error)?;
    let weight: u32 = Input::new()
        .with_prompt(t("order.input_weight"))
        .validate_with(|value: &u32| {
            if *value >= 1 {
                Ok(())
            } else {
                Err("weight must be at least 1")
            }
        })
        .interact_text()
        .map_err(input_error)?;
    Ok(Enchantment::new(name.trim(), level, weight))
}

fn input_error(e: dialoguer::Error) -> Error {
    Error::Arguments(format!("failed to read input: {e}"))
}

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?<name>.+?)(?:\s+(?<level>\d+|[IVXLCDMivxlcdm]+))?$")
            .expect("valid pattern")
    })
}

/// Resolve one interactive token: a plain catalog name, or a name followed
/// by a decimal or Roman level ("Sharpness 3", "Sharpness III").
fn parse_entry(catalog: &JsonCatalog, text: &str) -> Result<Enchantment> {
    if let Some(entry) = catalog.find(text) {
        return Ok(entry.enchantment());
    }
    if let Some(captures) = entry_pattern().captures(text) {
        if let (Some(name), Some(token)) = (captures.name("name"), captures.name("level")) {
            if let Some(entry) = catalog.find(name.as_str()) {
                let level = token
                    .as_str()
                    .parse::<u32>()
                    .ok()
                    .or_else(|| parse_roman_numeral(token.as_str()));
                if let Some(level) = level.filter(|level| *level >= 1) {
                    return Ok(entry.enchantment_at(level));
                }
            }
        }
    }
    Err(Error::EnchantmentNotFound(text.to_string()))
}
