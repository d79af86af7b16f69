//! Integration tests for the shop bookkeeping library
//!
//! These tests drive the public API the way the batch job does: files on
//! disk are loaded and migrated, the ledger is updated, and reports are
//! built from the result.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serial_test::serial;
use tempfile::TempDir;

use duka_ledger::{
    context::{MigrationContext, UserId},
    i18n::{FieldKey, Locale, MigrationMetrics},
    ledger::Dataset,
    migration::{migrate, migrate_or_original, normalize_column},
    records::{RecordSet, Value},
    report::{ReportPeriod, SalesReport},
    store::DataStore,
    validation::RecordValidator,
};

// ==================== Test Helpers ====================

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 10)
        .unwrap()
        .and_hms_opt(18, 30, 0)
        .unwrap()
}

fn ctx(locale: Locale) -> MigrationContext {
    MigrationContext::at(locale, UserId::new("baraka"), fixed_now())
}

fn create_test_store(temp_dir: &TempDir) -> DataStore {
    DataStore::open(temp_dir.path(), UserId::new("baraka")).expect("Failed to open store")
}

// ==================== Locale Resolution Tests ====================

#[test]
fn test_resolve_supported_and_unsupported_tags() {
    assert_eq!(Locale::resolve("sw"), Locale::SWAHILI);
    assert_eq!(Locale::resolve("en"), Locale::ENGLISH);
    assert_eq!(Locale::resolve("fr"), Locale::default_locale());
}

// ==================== Migration Scenario Tests ====================

#[test]
fn test_swahili_inventory_to_english() {
    let records = RecordSet::from_rows(
        ["Bidhaa", "Bei_ya_ununuzi", "Hifadhi"],
        vec![vec!["Maharage".into(), 1000.into(), 50.into()]],
    )
    .unwrap();

    let start = Local::now().naive_local();
    let context = MigrationContext::new(Locale::ENGLISH, UserId::guest());
    let migrated = migrate(&records, &context).unwrap().into_records();

    assert_eq!(migrated.columns, vec!["product", "cost_price", "stock", "date"]);
    assert_eq!(migrated.rows[0][..3], records.rows[0][..]);
    let backfilled = migrated.value(0, "date").and_then(Value::as_date).unwrap();
    assert!(backfilled >= start);
}

#[test]
fn test_half_migrated_sales_keep_their_dates() {
    let sold_on = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let records = RecordSet::from_rows(
        ["product", "cost_price", "stock", "Tarehe", "Jumla_bei", "Faida"],
        vec![vec![
            "Maharage".into(),
            1000.into(),
            50.into(),
            Value::Date(sold_on),
            3000.into(),
            600.into(),
        ]],
    )
    .unwrap();

    let migrated = migrate(&records, &ctx(Locale::ENGLISH)).unwrap().into_records();
    assert_eq!(
        migrated.columns,
        vec!["product", "cost_price", "stock", "date", "total_price", "profit"]
    );
    assert_eq!(migrated.value(0, "date"), Some(&Value::Date(sold_on)));

    let today = SalesReport::build(&migrated, Locale::ENGLISH, ReportPeriod::Today, fixed_now().date())
        .unwrap();
    assert_eq!(today.sales_count, 0);
}

#[test]
fn test_empty_migration_is_identity_for_both_locales() {
    for locale in [Locale::SWAHILI, Locale::ENGLISH] {
        let migrated = migrate_or_original(RecordSet::default(), &ctx(locale));
        assert_eq!(migrated, RecordSet::default());
    }
}

#[test]
fn test_round_trip_between_locales() {
    let english = RecordSet::from_rows(
        ["date", "product", "quantity", "unit_price", "total_price", "cost_price", "profit", "stock"],
        vec![vec![
            Value::Date(fixed_now()),
            "Sukari".into(),
            2.into(),
            3000.into(),
            6000.into(),
            2500.into(),
            1000.into(),
            8.into(),
        ]],
    )
    .unwrap();

    let swahili = migrate(&english, &ctx(Locale::SWAHILI)).unwrap().into_records();
    assert_eq!(
        swahili.columns,
        vec!["Tarehe", "Bidhaa", "Idadi", "Bei_ya_rejareja", "Jumla_bei", "Bei_ya_ununuzi", "Faida", "Hifadhi"]
    );

    let back = migrate(&swahili, &ctx(Locale::ENGLISH)).unwrap().into_records();
    assert_eq!(back, english);
}

#[test]
fn test_backfill_defaults() {
    let records = RecordSet::from_rows(["product"], vec![vec!["Chumvi".into()]]).unwrap();
    let migrated = migrate(&records, &ctx(Locale::ENGLISH)).unwrap();

    assert_eq!(
        migrated.backfilled,
        vec![FieldKey::CostPrice, FieldKey::Stock, FieldKey::Date]
    );
    assert_eq!(migrated.records.value(0, "cost_price"), Some(&Value::Number(0.0)));
    assert_eq!(migrated.records.value(0, "stock"), Some(&Value::Number(0.0)));
    assert_eq!(migrated.records.value(0, "date"), Some(&Value::Date(fixed_now())));
}

#[test]
fn test_normalization_is_idempotent_on_known_typos() {
    for raw in ["Bidha", "Bidhaa", " Bet ya mauzo ", "Hitadhi", "Falda"] {
        let once = normalize_column(raw);
        assert_eq!(normalize_column(&once), once);
    }
}

#[test]
#[serial]
fn test_failed_migration_counts_and_keeps_input() {
    MigrationMetrics::global().reset();
    let ragged = RecordSet {
        columns: vec!["Bidhaa".to_string(), "Hifadhi".to_string()],
        rows: vec![vec!["Maharage".into()]],
    };

    let out = migrate_or_original(ragged.clone(), &ctx(Locale::ENGLISH));
    assert_eq!(out, ragged);
    assert_eq!(MigrationMetrics::global().failures(), 1);
}

// ==================== Validation Tests ====================

#[test]
fn test_validate_empty_is_true() {
    assert!(RecordValidator::is_valid(
        &RecordSet::default(),
        &[FieldKey::Product],
        Locale::ENGLISH
    ));
}

#[test]
fn test_validate_reports_missing_stock() {
    let records = RecordSet::from_rows(
        ["Bidhaa", "Bei_ya_ununuzi", "Tarehe"],
        vec![vec!["Maharage".into(), 1000.into(), Value::Date(fixed_now())]],
    )
    .unwrap();

    let report = RecordValidator::validate(&records, &FieldKey::REQUIRED, Locale::SWAHILI);
    assert!(!report.is_valid());
    assert_eq!(report.missing_columns, vec!["Hifadhi"]);
}

// ==================== End-to-End Tests ====================

#[test]
fn test_switching_locale_rewrites_files() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);

    // Operator starts in Swahili
    let mut ledger = store.load_ledger(&ctx(Locale::SWAHILI)).unwrap();
    ledger.add_product("Maharage", 1000.0, 50).unwrap();
    ledger.restock("Maharage", 10, 1100.0, fixed_now()).unwrap();
    let sale = ledger.record_sale("Maharage", 4, 1500.0, fixed_now()).unwrap();
    assert_eq!(sale.event().message(Locale::SWAHILI), "4 Maharage zimeuzwa kikamilifu");
    store.save_ledger(&ledger).unwrap();

    // ... and later switches to English
    let english = store.load_ledger(&ctx(Locale::ENGLISH)).unwrap();
    store.save_ledger(&english).unwrap();

    let product = english.product("Maharage").unwrap();
    assert_eq!(product.stock, 56.0);
    assert_eq!(product.cost_price, 1100.0);
    assert_eq!(
        english.stock_summary().unwrap(),
        "Current stock:\n  Maharage: 56"
    );

    let header = std::fs::read_to_string(store.path(Dataset::Sales)).unwrap();
    assert!(header.starts_with("product,cost_price,stock,date,quantity"));

    let report = SalesReport::build(
        &english.sales,
        Locale::ENGLISH,
        ReportPeriod::Today,
        fixed_now().date(),
    )
    .unwrap();
    assert_eq!(report.revenue, 6000.0);
    assert_eq!(report.profit, 1600.0);
    assert!(report.render().contains("TZS 6,000"));
}

#[test]
fn test_same_locale_load_does_not_touch_files() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let inventory = "Bidhaa,Bei_ya_ununuzi,Hifadhi\nSukari,2500,3\n";
    let purchases = "Tarehe,Bidhaa,Idadi,Bei_ya_ununuzi\n2024-05-01 00:00:00,Sukari,3,2500\n";
    std::fs::write(store.path(Dataset::Inventory), inventory).unwrap();
    std::fs::write(store.path(Dataset::Purchases), purchases).unwrap();

    let ledger = store.load_ledger(&ctx(Locale::SWAHILI)).unwrap();
    assert!(!ledger.inventory.has_column("Tarehe"));
    assert!(!ledger.purchases.has_column("Hifadhi"));

    assert!(store.save_migrated(&ledger).unwrap().is_empty());
    assert_eq!(std::fs::read_to_string(store.path(Dataset::Inventory)).unwrap(), inventory);
    assert_eq!(std::fs::read_to_string(store.path(Dataset::Purchases)).unwrap(), purchases);
}

#[test]
fn test_legacy_typo_file_loads_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    std::fs::write(
        store.path(Dataset::Sales),
        "Tarehe,Bidha,Idadi,Bet_ya_rejareja,Jumla_bei,Bei_ya_ununuzi,Falda,Hitadhi\n\
         2024-05-10,Unga,2,2000,4000,1800,400,\n",
    )
    .unwrap();

    let sales = store.load(Dataset::Sales, &ctx(Locale::SWAHILI)).unwrap();
    assert_eq!(
        sales.columns,
        vec!["Tarehe", "Bidhaa", "Idadi", "Bei_ya_rejareja", "Jumla_bei", "Bei_ya_ununuzi", "Faida", "Hifadhi"]
    );
    assert_eq!(sales.value(0, "Hifadhi"), Some(&Value::Number(0.0)));
    assert!(RecordValidator::is_valid(&sales, &FieldKey::REQUIRED, Locale::SWAHILI));

    let report = SalesReport::build(&sales, Locale::SWAHILI, ReportPeriod::ThisMonth, fixed_now().date())
        .unwrap();
    assert_eq!(report.profit, 400.0);
    assert!(report.render().contains("Jumla ya faida: TZS 400"));
}
