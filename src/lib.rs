//! Bookkeeping for a small shop run in Swahili or English.
//!
//! Inventory, sales and purchases are flat CSV tables whose column names
//! follow the operator's language. The `migration` module moves a table
//! between the two naming schemes; `validation` checks the result;
//! `ledger` and `report` work on top of it.

pub mod config;
pub mod context;
pub mod i18n;
pub mod ledger;
pub mod migration;
pub mod records;
pub mod report;
pub mod store;
pub mod validation;
