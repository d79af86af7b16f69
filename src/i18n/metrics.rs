//! Migration metrics.
//!
//! Process-wide counters for column migrations: how many ran, how many
//! were skipped because the input was empty, how many columns were renamed
//! or backfilled, and how many migrations failed.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global migration metrics singleton.
pub struct MigrationMetrics {
    /// Migrations that completed successfully on non-empty input
    migrations: AtomicUsize,

    /// Migrations short-circuited because the record set was empty
    skipped_empty: AtomicUsize,

    /// Columns renamed from the source locale to the target locale
    renamed_columns: AtomicUsize,

    /// Required columns that had to be added with default values
    backfilled_columns: AtomicUsize,

    /// Migrations that returned an error
    failures: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<MigrationMetrics> = OnceLock::new();

impl MigrationMetrics {
    /// Get the global migration metrics instance.
    pub fn global() -> &'static MigrationMetrics {
        METRICS.get_or_init(MigrationMetrics::new)
    }

    /// A standalone set of counters, all zero.
    pub fn new() -> Self {
        Self {
            migrations: AtomicUsize::new(0),
            skipped_empty: AtomicUsize::new(0),
            renamed_columns: AtomicUsize::new(0),
            backfilled_columns: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        }
    }

    /// Record a completed migration with its rename and backfill counts.
    pub fn record_migration(&self, renamed: usize, backfilled: usize) {
        self.migrations.fetch_add(1, Ordering::Relaxed);
        self.renamed_columns.fetch_add(renamed, Ordering::Relaxed);
        self.backfilled_columns
            .fetch_add(backfilled, Ordering::Relaxed);
    }

    pub fn record_skipped_empty(&self) {
        self.skipped_empty.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn migrations(&self) -> usize {
        self.migrations.load(Ordering::Relaxed)
    }

    pub fn skipped_empty(&self) -> usize {
        self.skipped_empty.load(Ordering::Relaxed)
    }

    pub fn renamed_columns(&self) -> usize {
        self.renamed_columns.load(Ordering::Relaxed)
    }

    pub fn backfilled_columns(&self) -> usize {
        self.backfilled_columns.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let migrations = self.migrations();
        let failures = self.failures();
        let attempts = migrations + failures;
        let success_rate = if attempts > 0 {
            (migrations as f64 / attempts as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            migrations,
            skipped_empty: self.skipped_empty(),
            renamed_columns: self.renamed_columns(),
            backfilled_columns: self.backfilled_columns(),
            failures,
            success_rate,
        }
    }

    /// Reset all metrics to zero (useful for testing).
    pub fn reset(&self) {
        self.migrations.store(0, Ordering::Relaxed);
        self.skipped_empty.store(0, Ordering::Relaxed);
        self.renamed_columns.store(0, Ordering::Relaxed);
        self.backfilled_columns.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }
}

impl Default for MigrationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the migration counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub migrations: usize,
    pub skipped_empty: usize,
    pub renamed_columns: usize,
    pub backfilled_columns: usize,
    pub failures: usize,

    /// Successful migrations as a percentage of attempts (0-100)
    pub success_rate: f64,
}
