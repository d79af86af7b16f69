use crate::context::UserId;
use crate::i18n::Locale;
use crate::report::ReportPeriod;
use anyhow::{bail, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub data_dir: PathBuf,
    pub user: UserId,

    // Localization
    pub locale: Locale,

    // Reporting
    pub report_period: ReportPeriod,
    pub report_json: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let report_period = match std::env::var("DUKA_REPORT_PERIOD") {
            Ok(value) => match ReportPeriod::from_key(&value) {
                Some(period) => period,
                None => bail!(
                    "DUKA_REPORT_PERIOD must be one of today, week, month (got '{}')",
                    value
                ),
            },
            Err(_) => ReportPeriod::Today,
        };

        Ok(Self {
            // Storage
            data_dir: std::env::var("DUKA_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            user: std::env::var("DUKA_USER")
                .map(UserId::new)
                .unwrap_or_default(),

            // Localization - unsupported tags fall back to Swahili with a warning
            locale: std::env::var("DUKA_LOCALE")
                .map(|tag| Locale::resolve(&tag))
                .unwrap_or_default(),

            // Reporting
            report_period,
            report_json: std::env::var("DUKA_REPORT_JSON")
                .ok()
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}
