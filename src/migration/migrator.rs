//! Column migration between the Swahili and English naming schemes.

use crate::context::MigrationContext;
use crate::i18n::{FieldKey, Locale, MigrationMetrics};
use crate::migration::normalize::normalize_columns;
use crate::records::{RecordError, RecordSet, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MigrationError {
    #[error("Malformed record set: {0}")]
    MalformedRows(#[from] RecordError),

    #[error("Column '{column}' appears more than once after migrating to '{locale}'")]
    ColumnCollision { column: String, locale: Locale },
}

/// Outcome of a successful migration.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub records: RecordSet,
    /// Locale most of the input header was in
    pub source: Locale,
    pub target: Locale,
    /// (old name, new name) for every renamed column
    pub renamed: Vec<(String, String)>,
    /// Required fields that had to be added with defaults
    pub backfilled: Vec<FieldKey>,
}

impl Migration {
    pub fn into_records(self) -> RecordSet {
        self.records
    }
}

/// Guess which locale most of a header is written in.
///
/// Counts the columns that are known display names in each locale. The
/// higher count wins; a tie (including no known columns at all) falls back
/// to "whatever the target is not". The result is reported on `Migration`;
/// renaming itself is decided column by column.
pub fn detect_source_locale(columns: &[String], target: Locale) -> Locale {
    let score = |locale: Locale| {
        columns
            .iter()
            .filter(|name| FieldKey::from_display_name(name, locale).is_some())
            .count()
    };

    let other = target.other();
    let target_score = score(target);
    let other_score = score(other);

    if target_score > other_score {
        target
    } else {
        other
    }
}

/// Migrate `records` into `ctx.locale`, backfilling `FieldKey::REQUIRED`.
///
/// Empty input is returned untouched. On error nothing is partially
/// applied; the caller still owns the original input.
pub fn migrate(records: &RecordSet, ctx: &MigrationContext) -> Result<Migration, MigrationError> {
    migrate_requiring(records, ctx, &FieldKey::REQUIRED)
}

/// Migrate `records` into `ctx.locale`, backfilling only `required`.
pub fn migrate_requiring(
    records: &RecordSet,
    ctx: &MigrationContext,
    required: &[FieldKey],
) -> Result<Migration, MigrationError> {
    let metrics = MigrationMetrics::global();

    if records.is_empty() {
        metrics.record_skipped_empty();
        return Ok(Migration {
            records: records.clone(),
            source: ctx.locale,
            target: ctx.locale,
            renamed: Vec::new(),
            backfilled: Vec::new(),
        });
    }

    match migrate_non_empty(records, ctx, required) {
        Ok(migration) => {
            metrics.record_migration(migration.renamed.len(), migration.backfilled.len());
            Ok(migration)
        }
        Err(e) => {
            metrics.record_failure();
            Err(e)
        }
    }
}

/// Migrate, logging and returning the original input on failure.
///
/// A returned set may therefore still be in the source locale; callers that
/// depend on specific columns should validate afterwards.
pub fn migrate_or_original(records: RecordSet, ctx: &MigrationContext) -> RecordSet {
    migrate_or_original_requiring(records, ctx, &FieldKey::REQUIRED)
}

/// `migrate_or_original` with the backfilled fields chosen by the caller.
pub fn migrate_or_original_requiring(
    records: RecordSet,
    ctx: &MigrationContext,
    required: &[FieldKey],
) -> RecordSet {
    match migrate_requiring(&records, ctx, required) {
        Ok(migration) => migration.into_records(),
        Err(e) => {
            error!(
                user = %ctx.user,
                target = %ctx.locale,
                error = %e,
                "Data migration failed, keeping original columns"
            );
            records
        }
    }
}

fn migrate_non_empty(
    records: &RecordSet,
    ctx: &MigrationContext,
    required: &[FieldKey],
) -> Result<Migration, MigrationError> {
    records.check_shape()?;

    let target = ctx.locale;
    let columns = normalize_columns(&records.columns);
    let source = detect_source_locale(&columns, target);

    let other = target.other();
    let present: HashSet<String> = columns.iter().cloned().collect();

    // Renaming is per column: a source name is carried over unless its
    // target name is already in the header.
    let mut renamed = Vec::new();
    let columns: Vec<String> = columns
        .into_iter()
        .map(|name| {
            let Some(field) = FieldKey::from_display_name(&name, other) else {
                return name;
            };
            let new_name = field.display_name(target);
            if present.contains(new_name) {
                warn!(
                    user = %ctx.user,
                    column = %name,
                    existing = new_name,
                    "Target column already present, keeping source column as is"
                );
                return name;
            }
            renamed.push((name, new_name.to_string()));
            new_name.to_string()
        })
        .collect();

    let mut seen = HashSet::new();
    if let Some(duplicate) = columns.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(MigrationError::ColumnCollision {
            column: duplicate.clone(),
            locale: target,
        });
    }

    let mut migrated = RecordSet {
        columns,
        rows: records.rows.clone(),
    };

    let mut backfilled = Vec::new();
    for &field in required {
        let name = field.display_name(target);
        if !migrated.has_column(name) {
            let fill = match field {
                FieldKey::Date => Value::Date(ctx.now),
                _ => Value::Number(0.0),
            };
            migrated.push_column(name, fill);
            backfilled.push(field);
        }
    }

    for cell in migrated.rows.iter_mut().flatten() {
        if cell.is_empty() {
            *cell = Value::Number(0.0);
        }
    }

    if !renamed.is_empty() || !backfilled.is_empty() {
        info!(
            user = %ctx.user,
            source = %source,
            target = %target,
            renamed = renamed.len(),
            backfilled = backfilled.len(),
            "Migrated record set columns"
        );
    } else {
        debug!(user = %ctx.user, target = %target, "Record set already in target locale");
    }

    Ok(Migration {
        records: migrated,
        source,
        target,
        renamed,
        backfilled,
    })
}
