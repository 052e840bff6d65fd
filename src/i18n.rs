//! Locale helpers over rust-i18n.
//!
//! The `rust_i18n::i18n!` macro is initialized in the library root; this
//! module wraps the global locale state and message lookup behind plain
//! functions.

/// Locale used when the user asks for "default" or an unknown code.
pub const DEFAULT_LOCALE: &str = "en";

/// Locale codes with shipped resources; "default" resolves to
/// [`DEFAULT_LOCALE`].
pub const AVAILABLE_LOCALES: &[&str] = &["default", "en", "zh-CN"];

/// Current UI locale code.
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switch the UI locale. "default" (any case) resolves to
/// [`DEFAULT_LOCALE`].
pub fn set_locale(locale: &str) {
    if locale.eq_ignore_ascii_case("default") {
        rust_i18n::set_locale(DEFAULT_LOCALE);
    } else {
        rust_i18n::set_locale(locale);
    }
}

/// Whether resources ship for the given code.
pub fn is_available(locale: &str) -> bool {
    AVAILABLE_LOCALES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(locale))
}

/// Translate a message key.
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate a message key, substituting `%{name}` placeholders.
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (name, value) in args {
        let placeholder = format!("%{{{name}}}");
        result = result.replace(&placeholder, value);
    }
    result
}
