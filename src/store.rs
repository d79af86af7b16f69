//! CSV persistence for the per-operator data sets.
//!
//! Each operator has three files in the data directory:
//! `inventory_{user}.csv`, `sales_{user}.csv` and `purchases_{user}.csv`.
//! Loading migrates the columns into the requested locale; saving writes
//! whatever columns the record set carries.

use crate::context::{MigrationContext, UserId};
use crate::i18n::{FieldKey, Locale};
use crate::ledger::{Dataset, Ledger};
use crate::migration::migrate_or_original_requiring;
use crate::records::{RecordSet, Value};
use crate::validation::RecordValidator;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File-backed store for one operator's data sets.
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
    user: UserId,
}

impl DataStore {
    /// Open (and create if needed) the data directory for `user`.
    pub fn open(dir: impl Into<PathBuf>, user: UserId) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir, user })
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Path of one data set's file.
    pub fn path(&self, dataset: Dataset) -> PathBuf {
        self.dir
            .join(format!("{}_{}.csv", dataset.as_str(), self.user.as_str()))
    }

    /// Load a data set in `ctx.locale`.
    ///
    /// A missing file is created with the data set's default header, and a
    /// file with no rows is read as that header in `ctx.locale`. Dates
    /// that cannot be parsed are replaced with `ctx.now`. Migration
    /// failures keep the file's original columns; validation problems are
    /// logged, not returned.
    pub fn load(&self, dataset: Dataset, ctx: &MigrationContext) -> Result<RecordSet, StoreError> {
        let path = self.path(dataset);

        if !path.exists() {
            info!(path = %path.display(), dataset = dataset.as_str(), "Creating new data file");
            let records = dataset.empty_records(ctx.locale);
            write_csv(&path, &records)?;
            return Ok(records);
        }

        let mut records = read_csv(&path)?;
        if records.rows.is_empty() {
            // Nothing to migrate; start over with this locale's header
            debug!(path = %path.display(), dataset = dataset.as_str(), "Data file has no rows");
            return Ok(dataset.empty_records(ctx.locale));
        }
        coerce_dates(&mut records, ctx.now);

        let required = dataset.required_fields();
        let records = migrate_or_original_requiring(records, ctx, required);

        if !RecordValidator::is_valid(&records, required, ctx.locale) {
            error!(
                dataset = dataset.as_str(),
                user = %self.user,
                "Data failed validation. Some columns may be missing."
            );
        }

        debug!(dataset = dataset.as_str(), rows = records.len(), "Loaded data set");
        Ok(records)
    }

    pub fn save(&self, dataset: Dataset, records: &RecordSet) -> Result<(), StoreError> {
        write_csv(&self.path(dataset), records)
    }

    /// Header of a data set's file as stored, or `None` if there is no file.
    pub fn stored_header(&self, dataset: Dataset) -> Result<Option<Vec<String>>, StoreError> {
        let path = self.path(dataset);
        if !path.exists() {
            return Ok(None);
        }
        let csv_err = |source| StoreError::Csv {
            path: path.clone(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(csv_err)?;
        let header = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(str::to_string)
            .collect();
        Ok(Some(header))
    }

    /// Load all three data sets into a ledger.
    pub fn load_ledger(&self, ctx: &MigrationContext) -> Result<Ledger, StoreError> {
        Ok(Ledger::new(
            ctx.locale,
            self.load(Dataset::Inventory, ctx)?,
            self.load(Dataset::Sales, ctx)?,
            self.load(Dataset::Purchases, ctx)?,
        ))
    }

    /// Write back the data sets whose header differs from the stored one.
    ///
    /// Used after loading to persist column migrations; files that loading
    /// left as they were are not rewritten. Returns the data sets written.
    pub fn save_migrated(&self, ledger: &Ledger) -> Result<Vec<Dataset>, StoreError> {
        let mut written = Vec::new();
        for dataset in Dataset::ALL {
            let records = ledger.records(dataset);
            if self.stored_header(dataset)?.as_ref() != Some(&records.columns) {
                self.save(dataset, records)?;
                written.push(dataset);
            }
        }
        if !written.is_empty() {
            info!(
                user = %self.user,
                datasets = ?written,
                "Wrote migrated data files"
            );
        }
        Ok(written)
    }

    /// Write all three data sets back.
    ///
    /// Files are written one after another; a failure part-way leaves the
    /// earlier files updated.
    pub fn save_ledger(&self, ledger: &Ledger) -> Result<(), StoreError> {
        for dataset in Dataset::ALL {
            self.save(dataset, ledger.records(dataset))?;
        }
        Ok(())
    }
}

/// Read a CSV file into a record set.
///
/// Short rows are padded with empty cells; rows longer than the header are
/// skipped with a warning.
pub fn read_csv(path: &Path) -> Result<RecordSet, StoreError> {
    let csv_err = |source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    let width = columns.len();

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        if record.len() > width {
            warn!(
                path = %path.display(),
                line = line + 2,
                fields = record.len(),
                expected = width,
                "Skipping malformed line"
            );
            continue;
        }
        let mut row: Vec<Value> = record.iter().map(Value::parse_cell).collect();
        row.resize(width, Value::Empty);
        rows.push(row);
    }

    Ok(RecordSet { columns, rows })
}

/// Write a record set to a CSV file, replacing it.
pub fn write_csv(path: &Path, records: &RecordSet) -> Result<(), StoreError> {
    let csv_err = |source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(&records.columns).map_err(csv_err)?;
    for row in &records.rows {
        writer
            .write_record(row.iter().map(Value::to_cell))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Turn the date column (in either locale) into `Value::Date`.
fn coerce_dates(records: &mut RecordSet, now: NaiveDateTime) {
    let Some(idx) = Locale::all()
        .into_iter()
        .find_map(|locale| records.column_index(FieldKey::Date.display_name(locale)))
    else {
        return;
    };

    for row in &mut records.rows {
        if let Some(cell) = row.get_mut(idx) {
            *cell = Value::Date(cell.to_datetime().unwrap_or(now));
        }
    }
}
