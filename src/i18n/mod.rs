//! Internationalization (i18n) support for ustaz
//!
//! User-facing text (error descriptions, geolocation messages, CLI output)
//! is looked up in the `locales/` catalog. Supported languages: English (en),
//! Arabic (ar).
//!
//! # Environment Variables
//!
//! - `USTAZ_LANG`: Set the preferred language (en, ar). Defaults to English.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ustaz::i18n::{t, set_locale};
//!
//! set_locale("ar-EG");
//! let msg = t!("geo.denied");
//! ```

use std::sync::RwLock;

// Note: rust_i18n::i18n! macro is declared in lib.rs (crate root)

static CURRENT_LOCALE: RwLock<String> = RwLock::new(String::new());

/// Set the current locale for translations
///
/// Unknown locales fall back to English.
pub fn set_locale(locale: &str) {
    let normalized = normalize_locale(locale);
    rust_i18n::set_locale(normalized);
    if let Ok(mut current) = CURRENT_LOCALE.write() {
        *current = normalized.to_string();
    }
}

/// Get the current locale
pub fn current_locale() -> String {
    CURRENT_LOCALE
        .read()
        .ok()
        .filter(|locale| !locale.is_empty())
        .map(|locale| locale.clone())
        .unwrap_or_else(|| "en".to_string())
}

/// Initialize i18n from the `USTAZ_LANG` environment variable
pub fn init_from_env() {
    let locale = std::env::var("USTAZ_LANG").unwrap_or_else(|_| "en".to_string());
    set_locale(&locale);
}

/// Normalize locale code to supported format
///
/// - ar-EG, ar_SA, arabic -> ar
/// - en-US, en_GB, english, anything else -> en
fn normalize_locale(locale: &str) -> &'static str {
    let lower = locale.to_lowercase();

    if lower.starts_with("ar") {
        "ar"
    } else {
        "en"
    }
}

/// Look up `key` in this crate's catalog and fill its `%{name}` placeholders
///
/// Unlike `t!`, this resolves against the library catalog from any crate.
///
/// ```rust,ignore
/// let msg = ustaz::i18n::message("cli.markers.count", &[("count", &3)]);
/// ```
pub fn message(key: &str, args: &[(&str, &dyn std::fmt::Display)]) -> String {
    let text = t!(key);
    if args.is_empty() {
        return text.into_owned();
    }
    let (patterns, values): (Vec<&str>, Vec<String>) = args
        .iter()
        .map(|(name, value)| (*name, value.to_string()))
        .unzip();
    rust_i18n::replace_patterns(&text, &patterns, &values)
}

/// Re-export of `rust_i18n::t!`
///
/// ```rust,ignore
/// use ustaz::i18n::t;
///
/// let msg = t!("errors.api.server", status = 503);
/// ```
#[doc(inline)]
pub use rust_i18n::t;
