//! Lang command - show or switch the UI language.

use crate::cli::style::{Stylize, check};
use anstream::println;
use anvil_order::error::{Error, Result};
use anvil_order::i18n::{self, t, t_with_args};
use anvil_order::settings;
use clap::Args;
use dialoguer::Select;

/// Arguments for `anvil lang`.
#[derive(Debug, Args)]
pub struct LangArgs {
    /// Locale code ("default", "en", "zh-CN"); prompts when omitted
    #[arg(value_name = "CODE")]
    pub code: Option<String>,
}

/// Run the lang command. The chosen locale is persisted in the settings
/// file and the catalog follows it on the next lookup.
pub fn run_lang(args: &LangArgs) -> Result<()> {
    let code = match &args.code {
        Some(code) => code.clone(),
        None => {
            println!(
                "{}",
                t_with_args("lang.current", &[("locale", &i18n::current_locale())]).muted()
            );
            let index = Select::new()
                .with_prompt(t("lang.prompt"))
                .items(i18n::AVAILABLE_LOCALES)
                .default(0)
                .interact()
                .map_err(|e| Error::Arguments(format!("failed to read selection: {e}")))?;
            i18n::AVAILABLE_LOCALES[index].to_string()
        }
    };

    if !i18n::is_available(&code) {
        return Err(Error::Arguments(format!("unknown language code: {code}")));
    }

    i18n::set_locale(&code);

    let mut saved = settings::load_settings().unwrap_or_default();
    saved.language = code;
    settings::save_settings(&saved)?;

    println!(
        "{} {}",
        check(),
        t_with_args("lang.changed", &[("locale", &i18n::current_locale())]).success()
    );
    Ok(())
}
