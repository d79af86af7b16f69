//! Locale registry: Single source of truth for all supported locales.
//!
//! The shop works in exactly two locales, Swahili and English. The registry
//! is built once on first access via `OnceLock` and never changes afterwards.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale tag (e.g., "sw", "en")
    pub code: &'static str,

    /// English name of the locale (e.g., "Swahili")
    pub name: &'static str,

    /// Native name of the locale (e.g., "Kiswahili")
    pub native_name: &'static str,

    /// Whether this is the fallback locale for unsupported tags (only one should be true)
    pub is_default: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its tag.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the tag is known
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get all supported locales.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default locale
    /// (a configuration error in `default_locales`).
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }
}

/// Swahili is the shop's working language and therefore the default.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "sw",
            name: "Swahili",
            native_name: "Kiswahili",
            is_default: true,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_swahili() {
        let config = LocaleRegistry::get()
            .get_by_code("sw")
            .expect("Swahili should be registered");

        assert_eq!(config.name, "Swahili");
        assert_eq!(config.native_name, "Kiswahili");
        assert!(config.is_default);
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LocaleRegistry::get()
            .get_by_code("en")
            .expect("English should be registered");

        assert_eq!(config.name, "English");
        assert!(!config.is_default);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LocaleRegistry::get().get_by_code("fr").is_none());
        assert!(LocaleRegistry::get().get_by_code("Swahili").is_none());
    }

    #[test]
    fn test_list_all_contains_both_locales() {
        let all = LocaleRegistry::get().list_all();

        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|locale| locale.code == "sw"));
        assert!(all.iter().any(|locale| locale.code == "en"));
    }

    #[test]
    fn test_default_locale_is_swahili() {
        assert_eq!(LocaleRegistry::get().default_locale().code, "sw");
    }
}
