//! Record set validation.
//!
//! Checks that a record set carries the columns a caller depends on, in the
//! caller's locale, and flags columns that hold no data at all. Validation
//! never fails; problems are reported in a `ValidationReport`.

use crate::i18n::{FieldKey, Locale};
use crate::records::RecordSet;
use tracing::{error, warn};

/// Validation report containing errors and warnings about a record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Missing columns and structural problems
    pub errors: Vec<String>,

    /// Non-critical findings such as all-empty columns
    pub warnings: Vec<String>,

    /// Display names of required columns that are absent
    pub missing_columns: Vec<String>,

    /// Columns where every cell is empty
    pub empty_columns: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            missing_columns: Vec::new(),
            empty_columns: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    /// A record set is valid when nothing was reported as an error.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for record set structure.
pub struct RecordValidator;

impl RecordValidator {
    /// Validate `records` against `required` fields named in `locale`.
    ///
    /// An empty record set is vacuously valid.
    pub fn validate(records: &RecordSet, required: &[FieldKey], locale: Locale) -> ValidationReport {
        let mut report = ValidationReport::new();

        if records.is_empty() {
            warn!(locale = %locale, "Empty record set detected");
            return report;
        }

        if let Err(e) = records.check_shape() {
            error!(error = %e, "Record set failed validation");
            report.errors.push(e.to_string());
            return report;
        }

        report.missing_columns = required
            .iter()
            .map(|field| field.display_name(locale))
            .filter(|name| !records.has_column(name))
            .map(str::to_string)
            .collect();

        if !report.missing_columns.is_empty() {
            let joined = report.missing_columns.join(", ");
            error!(locale = %locale, missing = %joined, "Missing required columns");
            report
                .errors
                .push(format!("Missing required columns: {}", joined));
        }

        report.empty_columns = records
            .columns
            .iter()
            .filter(|name| {
                records
                    .column_values(name)
                    .map(|mut values| values.all(|v| v.is_empty()))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        if !report.empty_columns.is_empty() {
            let joined = report.empty_columns.join(", ");
            warn!(columns = %joined, "Columns with all empty values");
            report
                .warnings
                .push(format!("Columns with all empty values: {}", joined));
        }

        report
    }

    /// Boolean form of `validate`.
    pub fn is_valid(records: &RecordSet, required: &[FieldKey], locale: Locale) -> bool {
        Self::validate(records, required, locale).is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Value;

    fn english_inventory() -> RecordSet {
        RecordSet::from_rows(
            ["product", "cost_price", "stock", "date"],
            vec![vec![
                "Maharage".into(),
                1000.into(),
                50.into(),
                "2024-05-10".into(),
            ]],
        )
        .unwrap()
    }

    // ==================== Empty Input Tests ====================

    #[test]
    fn test_empty_record_set_is_valid() {
        assert!(RecordValidator::is_valid(
            &RecordSet::default(),
            &[FieldKey::Product],
            Locale::ENGLISH
        ));
    }

    #[test]
    fn test_header_only_record_set_is_valid() {
        let records = RecordSet::new(["notes"]);
        assert!(RecordValidator::is_valid(
            &records,
            &FieldKey::REQUIRED,
            Locale::SWAHILI
        ));
    }

    // ==================== Missing Column Tests ====================

    #[test]
    fn test_complete_record_set_is_clean() {
        let report =
            RecordValidator::validate(&english_inventory(), &FieldKey::REQUIRED, Locale::ENGLISH);
        assert!(report.is_clean());
        assert!(report.is_valid());
    }

    #[test]
    fn test_missing_stock_column_is_reported() {
        let records = RecordSet::from_rows(
            ["product", "cost_price", "date"],
            vec![vec!["Maharage".into(), 1000.into(), "2024-05-10".into()]],
        )
        .unwrap();

        let report = RecordValidator::validate(&records, &FieldKey::REQUIRED, Locale::ENGLISH);
        assert!(!report.is_valid());
        assert_eq!(report.missing_columns, vec!["stock"]);
        assert!(report.errors[0].contains("stock"));
    }

    #[test]
    fn test_required_names_resolve_in_locale() {
        let report =
            RecordValidator::validate(&english_inventory(), &[FieldKey::Stock], Locale::SWAHILI);
        assert_eq!(report.missing_columns, vec!["Hifadhi"]);
    }

    #[test]
    fn test_no_required_fields_is_valid() {
        assert!(RecordValidator::is_valid(
            &english_inventory(),
            &[],
            Locale::ENGLISH
        ));
    }

    // ==================== Empty Column Tests ====================

    #[test]
    fn test_all_empty_column_is_warning() {
        let records = RecordSet::from_rows(
            ["product", "profit"],
            vec![
                vec!["Maharage".into(), Value::Empty],
                vec!["Sukari".into(), Value::Empty],
            ],
        )
        .unwrap();

        let report = RecordValidator::validate(&records, &[FieldKey::Product], Locale::ENGLISH);
        assert!(report.is_valid());
        assert!(report.has_warnings());
        assert_eq!(report.empty_columns, vec!["profit"]);
    }

    #[test]
    fn test_partially_empty_column_is_not_flagged() {
        let records = RecordSet::from_rows(
            ["product", "profit"],
            vec![
                vec!["Maharage".into(), Value::Empty],
                vec!["Sukari".into(), 300.into()],
            ],
        )
        .unwrap();

        let report = RecordValidator::validate(&records, &[], Locale::ENGLISH);
        assert!(report.empty_columns.is_empty());
    }

    // ==================== Structural Tests ====================

    #[test]
    fn test_ragged_record_set_is_invalid() {
        let records = RecordSet {
            columns: vec!["product".to_string(), "stock".to_string()],
            rows: vec![vec!["Maharage".into()]],
        };

        let report = RecordValidator::validate(&records, &[FieldKey::Product], Locale::ENGLISH);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("Row 0"));
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_validation_report_new() {
        let report = ValidationReport::new();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_validation_report_with_warning_is_still_valid() {
        let mut report = ValidationReport::new();
        report.warnings.push("Test warning".to_string());

        assert!(!report.is_clean());
        assert!(report.is_valid());
    }
}
