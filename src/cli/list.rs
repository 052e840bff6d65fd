//! List command - order everything an item kind can take.
//!
//! Incompatible enchantments never share a computation: the catalog's
//! partitioning yields one candidate set per conflicted enchantment, each
//! is scheduled independently, and the plans are ranked with the plan
//! comparator.

use crate::cli::style::{Stylize, spinner_style};
use anstream::println;
use anvil_order::catalog::{Catalog, JsonCatalog, candidate_sets};
use anvil_order::error::{Error, Result};
use anvil_order::i18n::{self, t, t_with_args};
use anvil_order::order::{OrderingPlan, schedule};
use anvil_order::types::Enchantment;
use clap::Args;
use indicatif::ProgressBar;
use std::time::Duration;

/// Arguments for `anvil list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Item kind to enchant (sword, boots, trident, ...)
    #[arg(value_name = "ITEM")]
    pub item: String,

    /// Penalty already on the item from earlier anvil work
    #[arg(short, long, default_value_t = 0, value_name = "PENALTY")]
    pub penalty: u32,
}

/// Run the list command.
pub fn run_list(args: &ListArgs) -> Result<()> {
    let catalog = JsonCatalog::for_locale(&i18n::current_locale())?;
    let entries = catalog.for_item(&args.item);
    if entries.is_empty() {
        return Err(Error::ItemNotFound(args.item.clone()));
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(t_with_args("list.computing", &[("item", &args.item)]));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let mut feasible: Vec<OrderingPlan> = Vec::new();
    let mut infeasible: Vec<(Vec<Enchantment>, Error)> = Vec::new();
    for set in candidate_sets(&entries) {
        match schedule(&set, args.penalty) {
            Ok(plan) => feasible.push(plan),
            Err(e) => infeasible.push((set, e)),
        }
    }
    feasible.sort();
    spinner.finish_and_clear();

    println!("{} {}", t("order.start").emphasis(), args.item.accent());
    for (index, plan) in feasible.iter().enumerate() {
        println!("*****************");
        if index == 0 && feasible.len() > 1 {
            println!("{}", t("list.best").success());
        }
        println!("{plan}");
    }
    for (set, error) in &infeasible {
        println!("*****************");
        let names: Vec<String> = set.iter().map(ToString::to_string).collect();
        println!("{}", names.join(" + ").muted());
        println!("{}", error.to_string().warn());
    }
    Ok(())
}
