use anyhow::{Context, Result};
use duka_ledger::config::Config;
use duka_ledger::context::MigrationContext;
use duka_ledger::i18n::{LocaleStrings, MigrationMetrics};
use duka_ledger::report::SalesReport;
use duka_ledger::store::DataStore;
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("duka_ledger=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        user = %config.user,
        locale = %config.locale,
        data_dir = %config.data_dir.display(),
        "Starting bookkeeping job"
    );

    let ctx = MigrationContext::new(config.locale, config.user.clone());
    let store = DataStore::open(&config.data_dir, config.user.clone())
        .context("Failed to open data store")?;

    // Step 1: Load all data sets, migrating their columns into the configured locale
    let ledger = store.load_ledger(&ctx).context("Failed to load data")?;

    // Step 2: Persist migrated columns; files already in the operator's locale are left alone
    store
        .save_migrated(&ledger)
        .context("Failed to write migrated data")?;

    // Step 3: Report
    let report = SalesReport::build(&ledger.sales, ledger.locale(), config.report_period, ctx.now.date())
        .context("Failed to build sales report")?;

    if config.report_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let strings = LocaleStrings::for_locale(ledger.locale());
        let stock = ledger
            .stock_summary()
            .context("Failed to read inventory")?;
        println!(
            "{}\n\n{}\n\n{}",
            strings.logged_in_as.replace("{user}", store.user().as_str()),
            report.render(),
            stock
        );
    }

    let metrics = MigrationMetrics::global().report();
    info!(
        migrations = metrics.migrations,
        renamed = metrics.renamed_columns,
        backfilled = metrics.backfilled_columns,
        failures = metrics.failures,
        "Done"
    );
    Ok(())
}
