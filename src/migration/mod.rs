//! Bilingual column migration.
//!
//! - `normalize`: whitespace cleanup and typo correction of column names
//! - `migrator`: source-locale detection, renaming and required-field backfill

mod migrator;
mod normalize;

pub use migrator::{
    detect_source_locale, migrate, migrate_or_original, migrate_or_original_requiring,
    migrate_requiring, Migration, MigrationError,
};
pub use normalize::{normalize_column, normalize_columns};
