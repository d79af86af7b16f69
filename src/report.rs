//! Revenue and profit reports over the sales data set.

use crate::i18n::{FieldKey, Locale, LocaleStrings};
use crate::records::RecordSet;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Sales data is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Time window a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Today,
    Last7Days,
    ThisMonth,
}

impl ReportPeriod {
    /// Parse a period name: "today", "week" or "month".
    pub fn from_key(key: &str) -> Option<ReportPeriod> {
        match key.trim().to_ascii_lowercase().as_str() {
            "today" => Some(ReportPeriod::Today),
            "week" | "last_7_days" => Some(ReportPeriod::Last7Days),
            "month" | "this_month" => Some(ReportPeriod::ThisMonth),
            _ => None,
        }
    }

    /// Whether a sale on `date` falls in this period as seen from `today`.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            ReportPeriod::Today => date == today,
            ReportPeriod::Last7Days => date >= today - Duration::days(7),
            ReportPeriod::ThisMonth => date.year() == today.year() && date.month() == today.month(),
        }
    }

    fn title(&self, strings: &LocaleStrings) -> &'static str {
        match self {
            ReportPeriod::Today => strings.today_sales,
            ReportPeriod::Last7Days => strings.last_7_days,
            ReportPeriod::ThisMonth => strings.this_month,
        }
    }

    fn labels(&self, strings: &LocaleStrings) -> (&'static str, &'static str) {
        match self {
            ReportPeriod::Today => (strings.todays_revenue, strings.estimated_profit),
            _ => (strings.total_revenue, strings.total_profit),
        }
    }

    fn no_data(&self, strings: &LocaleStrings) -> &'static str {
        match self {
            ReportPeriod::Today => strings.no_sales_today,
            ReportPeriod::Last7Days => strings.no_data_weekly,
            ReportPeriod::ThisMonth => strings.no_data_monthly,
        }
    }
}

/// Totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub revenue: f64,
    pub profit: f64,
}

/// Revenue and profit for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub period: ReportPeriod,
    pub locale: Locale,
    pub today: NaiveDate,
    pub revenue: f64,
    pub profit: f64,
    pub sales_count: usize,
    /// Per-day totals in date order
    pub daily: Vec<DailyTotal>,
}

impl SalesReport {
    /// Summarize `sales` (named in `locale`) over `period`.
    ///
    /// Rows whose date cannot be read are left out. Non-numeric amounts
    /// count as zero.
    pub fn build(
        sales: &RecordSet,
        locale: Locale,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> Result<SalesReport, ReportError> {
        let date_col = FieldKey::Date.display_name(locale);
        let total_col = FieldKey::TotalPrice.display_name(locale);
        let profit_col = FieldKey::Profit.display_name(locale);

        let mut report = SalesReport {
            period,
            locale,
            today,
            revenue: 0.0,
            profit: 0.0,
            sales_count: 0,
            daily: Vec::new(),
        };

        // A fresh data set with no rows is reported as "no data", not an error
        if sales.rows.is_empty() {
            return Ok(report);
        }

        let missing: Vec<String> = [date_col, total_col, profit_col]
            .into_iter()
            .filter(|name| !sales.has_column(name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(ReportError::MissingColumns(missing));
        }

        let mut by_day: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for record in sales.records() {
            let Some(date) = record
                .get(date_col)
                .and_then(|value| value.to_datetime())
                .map(|dt| dt.date())
            else {
                continue;
            };
            if !period.contains(date, today) {
                continue;
            }

            let revenue = record.get(total_col).and_then(|v| v.as_f64()).unwrap_or(0.0);
            let profit = record.get(profit_col).and_then(|v| v.as_f64()).unwrap_or(0.0);

            report.revenue += revenue;
            report.profit += profit;
            report.sales_count += 1;

            let day = by_day.entry(date).or_insert((0.0, 0.0));
            day.0 += revenue;
            day.1 += profit;
        }

        report.daily = by_day
            .into_iter()
            .map(|(date, (revenue, profit))| DailyTotal {
                date,
                revenue,
                profit,
            })
            .collect();

        debug!(
            period = ?period,
            sales = report.sales_count,
            revenue = report.revenue,
            "Built sales report"
        );
        Ok(report)
    }

    /// Render the report as localized plain text.
    pub fn render(&self) -> String {
        let strings = LocaleStrings::for_locale(self.locale);
        let (revenue_label, profit_label) = self.period.labels(strings);

        let mut lines = vec![
            strings.app_title.to_string(),
            self.period.title(strings).to_string(),
            format!("{}: {}", revenue_label, format_tzs(self.revenue)),
            format!("{}: {}", profit_label, format_tzs(self.profit)),
        ];

        if self.sales_count == 0 {
            lines.push(self.period.no_data(strings).to_string());
        } else {
            lines.push(
                strings
                    .sales_count
                    .replace("{count}", &self.sales_count.to_string()),
            );
            for day in &self.daily {
                lines.push(format!(
                    "  {}  {}  {}",
                    day.date.format("%Y-%m-%d"),
                    format_tzs(day.revenue),
                    format_tzs(day.profit)
                ));
            }
        }

        lines.join("\n")
    }
}

/// Format an amount as Tanzanian shillings, e.g. `TZS 12,500`.
pub fn format_tzs(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("TZS {}{}", sign, grouped)
}
