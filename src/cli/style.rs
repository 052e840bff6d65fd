//! Terminal styling helpers shared by the commands.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream};

/// Checkmark glyph for success lines.
pub const CHECK: &str = "✓";

/// Styled checkmark.
pub fn check() -> String {
    CHECK.success()
}

/// Spinner template shared by long-running commands.
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Extension methods for styled terminal output. Colors drop out when
/// stdout is not a terminal.
pub trait Stylize: std::fmt::Display {
    /// Dim, secondary text.
    fn muted(&self) -> String {
        self.to_string()
            .if_supports_color(Stream::Stdout, |text| text.dimmed())
            .to_string()
    }

    /// Highlighted value.
    fn accent(&self) -> String {
        self.to_string()
            .if_supports_color(Stream::Stdout, |text| text.cyan())
            .to_string()
    }

    /// Bold lead-in text.
    fn emphasis(&self) -> String {
        self.to_string()
            .if_supports_color(Stream::Stdout, |text| text.bold())
            .to_string()
    }

    /// Positive outcome.
    fn success(&self) -> String {
        self.to_string()
            .if_supports_color(Stream::Stdout, |text| text.green())
            .to_string()
    }

    /// Something that needs attention.
    fn warn(&self) -> String {
        self.to_string()
            .if_supports_color(Stream::Stdout, |text| text.yellow())
            .to_string()
    }
}

impl<T: std::fmt::Display> Stylize for T {}
