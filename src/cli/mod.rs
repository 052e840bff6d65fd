//! Command-line interface for the anvil binary.

mod lang;
mod list;
mod order;
pub mod style;

pub use lang::{LangArgs, run_lang};
pub use list::{ListArgs, run_list};
pub use order::{OrderArgs, run_interactive, run_order};

use clap::{Parser, Subcommand};

/// Cheapest anvil combine order for leveled, weighted enchantments.
#[derive(Debug, Parser)]
#[command(name = "anvil", version, about)]
pub struct Cli {
    /// Subcommand; omit it for the interactive prompt.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Order the given enchantments onto one item
    Order(OrderArgs),
    /// Order everything an item kind can take, ranked best-first
    List(ListArgs),
    /// Show or switch the UI language
    Lang(LangArgs),
}
