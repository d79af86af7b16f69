//! Explicit per-call context: who the data belongs to, which locale it
//! should be in, and what "now" is.

use crate::i18n::Locale;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Name used when no operator is signed in.
pub const GUEST_USER: &str = "guest";

/// Shop operator identifier. Selects the operator's data files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Blank names become the guest user.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::guest()
        } else {
            UserId(trimmed.to_string())
        }
    }

    pub fn guest() -> Self {
        UserId(GUEST_USER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::guest()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inputs every migration, validation and load call receives.
#[derive(Debug, Clone)]
pub struct MigrationContext {
    /// Target locale for column names
    pub locale: Locale,
    pub user: UserId,
    /// Timestamp used to backfill missing dates
    pub now: NaiveDateTime,
}

impl MigrationContext {
    /// Context stamped with the current local time.
    pub fn new(locale: Locale, user: UserId) -> Self {
        Self::at(locale, user, Local::now().naive_local())
    }

    /// Context with a fixed clock.
    pub fn at(locale: Locale, user: UserId, now: NaiveDateTime) -> Self {
        Self { locale, user, now }
    }
}
