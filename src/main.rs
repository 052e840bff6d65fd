//! anvil - cheapest combine order for your enchantments.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    anvil_order::logging::init();

    let settings = match anvil_order::settings::load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("{e}");
            anvil_order::settings::Settings::default()
        }
    };
    anvil_order::i18n::set_locale(&settings.language);

    let cli = cli::Cli::parse();
    match cli.command {
        Some(cli::Command::Order(args)) => cli::run_order(&args)?,
        Some(cli::Command::List(args)) => cli::run_list(&args)?,
        Some(cli::Command::Lang(args)) => cli::run_lang(&args)?,
        None => cli::run_interactive()?,
    }
    Ok(())
}
