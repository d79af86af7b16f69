//! Locale type: validated locale representation and the locale resolver.
//!
//! Callers hand the shop's locale around as a plain string (it comes from
//! whatever owns the UI or the environment). `Locale::resolve` turns that
//! string into a `Locale` that is guaranteed to be registered, falling back
//! to the default with a warning instead of failing.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// A validated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Locale {
    /// Locale tag ("sw" or "en")
    code: &'static str,
}

impl Locale {
    pub const SWAHILI: Locale = Locale { code: "sw" };

    pub const ENGLISH: Locale = Locale { code: "en" };

    /// Create a Locale from a tag, rejecting unknown tags.
    ///
    /// # Example
    /// ```ignore
    /// let english = Locale::from_code("en")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) => Ok(Locale { code: config.code }),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// Resolve a requested tag, falling back to the registry default.
    ///
    /// Never fails. An unsupported tag is logged at warn level.
    pub fn resolve(requested: &str) -> Locale {
        Self::resolve_or(requested, Locale::default_locale())
    }

    /// Resolve a requested tag, falling back to `default` when it is unsupported.
    pub fn resolve_or(requested: &str, default: Locale) -> Locale {
        match Self::from_code(requested) {
            Ok(locale) => locale,
            Err(_) => {
                warn!(
                    requested = %requested,
                    fallback = %default,
                    "Unsupported locale '{}', defaulting to '{}'",
                    requested,
                    default
                );
                default
            }
        }
    }

    /// The registry's default locale (Swahili).
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    /// All supported locales, in registry order.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list_all()
            .into_iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    /// The other supported locale.
    ///
    /// Only two locales exist, so this is the legacy "source is whatever the
    /// target is not" rule used when column detection is inconclusive.
    pub fn other(&self) -> Locale {
        Self::all()
            .into_iter()
            .find(|locale| locale != self)
            .unwrap_or(*self)
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// Locale built through `from_code`, `resolve` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// English name of the locale (e.g., "Swahili").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the locale (e.g., "Kiswahili").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::default_locale()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
