//! Internationalization (i18n) for the shop's two working locales.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales (Swahili default, English)
//! - `locale`: Validated `Locale` type and the locale resolver
//! - `columns`: Field keys and their per-locale column names
//! - `strings`: Localized report and ledger strings
//! - `metrics`: Column migration counters
//!
//! # Example
//!
//! ```rust,ignore
//! use duka_ledger::i18n::{FieldKey, Locale};
//!
//! let locale = Locale::resolve("en");
//! assert_eq!(FieldKey::Stock.display_name(locale), "stock");
//! ```

mod columns;
mod locale;
mod metrics;
mod registry;
mod strings;

pub use columns::{column_names, FieldKey};
pub use locale::Locale;
pub use metrics::{MetricsReport, MigrationMetrics};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::{LocaleStrings, ENGLISH_STRINGS, SWAHILI_STRINGS};
