//! Shop ledger: inventory, purchases and sales kept as locale-named record
//! sets.
//!
//! All columns are addressed through `FieldKey::display_name` so the same
//! operations work whether the operator's files are in Swahili or English.

use crate::i18n::{column_names, FieldKey, Locale, LocaleStrings};
use crate::records::{RecordSet, Value};
use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Selling price suggested for a product: cost price plus 30%.
pub const DEFAULT_MARKUP: f64 = 1.3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Product name must not be empty")]
    EmptyProductName,

    #[error("Product '{0}' is not in the inventory")]
    UnknownProduct(String),

    #[error("Product '{0}' already exists")]
    DuplicateProduct(String),

    #[error("Not enough stock for '{product}': requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: f64,
    },

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Price must be positive, got {0}")]
    InvalidPrice(f64),

    #[error("Inventory is missing the '{0}' column")]
    MissingColumn(String),
}

/// The three per-operator data sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Inventory,
    Sales,
    Purchases,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Inventory, Dataset::Sales, Dataset::Purchases];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Inventory => "inventory",
            Dataset::Sales => "sales",
            Dataset::Purchases => "purchases",
        }
    }

    /// Header written when the data set does not exist yet.
    pub fn default_fields(&self) -> &'static [FieldKey] {
        match self {
            Dataset::Inventory => &[FieldKey::Product, FieldKey::CostPrice, FieldKey::Stock],
            Dataset::Sales => &[
                FieldKey::Product,
                FieldKey::CostPrice,
                FieldKey::Stock,
                FieldKey::Date,
                FieldKey::Qty,
                FieldKey::UnitPrice,
                FieldKey::TotalPrice,
                FieldKey::Profit,
            ],
            Dataset::Purchases => &[
                FieldKey::Date,
                FieldKey::Product,
                FieldKey::Qty,
                FieldKey::CostPrice,
            ],
        }
    }

    /// Fields loading backfills and validation checks for.
    ///
    /// Sales carry the full required set. Inventory has no date, and
    /// purchases have no stock level of their own.
    pub fn required_fields(&self) -> &'static [FieldKey] {
        match self {
            Dataset::Inventory => &[FieldKey::Product, FieldKey::CostPrice, FieldKey::Stock],
            Dataset::Sales => &FieldKey::REQUIRED,
            Dataset::Purchases => &[
                FieldKey::Date,
                FieldKey::Product,
                FieldKey::Qty,
                FieldKey::CostPrice,
            ],
        }
    }

    /// An empty record set with this data set's default header.
    pub fn empty_records(&self, locale: Locale) -> RecordSet {
        RecordSet::new(column_names(self.default_fields(), locale))
    }
}

/// One inventory row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub cost_price: f64,
    pub stock: f64,
}

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sale {
    pub product: String,
    pub qty: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub cost_price: f64,
    pub profit: f64,
    pub date: NaiveDateTime,
}

impl LedgerError {
    /// Text shown to the operator. Stock shortfalls have a localized message;
    /// everything else falls back to the error's own description.
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            LedgerError::InsufficientStock { .. } => {
                LocaleStrings::for_locale(locale).not_enough_stock.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// A completed ledger change, for confirmation messages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LedgerEvent<'a> {
    ProductAdded { product: &'a str },
    Restocked { product: &'a str, qty: u32 },
    Sold { product: &'a str, qty: u32 },
}

impl LedgerEvent<'_> {
    pub fn message(&self, locale: Locale) -> String {
        let strings = LocaleStrings::for_locale(locale);
        match *self {
            LedgerEvent::ProductAdded { product } => {
                strings.add_product_success.replace("{product}", product)
            }
            LedgerEvent::Restocked { product, qty } => strings
                .restock_success
                .replace("{qty}", &qty.to_string())
                .replace("{product}", product),
            LedgerEvent::Sold { product, qty } => strings
                .sale_success
                .replace("{qty}", &qty.to_string())
                .replace("{product}", product),
        }
    }
}

impl Sale {
    pub fn event(&self) -> LedgerEvent<'_> {
        LedgerEvent::Sold {
            product: &self.product,
            qty: self.qty,
        }
    }
}

/// The three data sets of one shop operator.
#[derive(Debug, Clone)]
pub struct Ledger {
    locale: Locale,
    pub inventory: RecordSet,
    pub sales: RecordSet,
    pub purchases: RecordSet,
}

impl Ledger {
    pub fn new(
        locale: Locale,
        inventory: RecordSet,
        sales: RecordSet,
        purchases: RecordSet,
    ) -> Self {
        Self {
            locale,
            inventory,
            sales,
            purchases,
        }
    }

    /// A ledger with no data and default headers.
    pub fn empty(locale: Locale) -> Self {
        Self::new(
            locale,
            Dataset::Inventory.empty_records(locale),
            Dataset::Sales.empty_records(locale),
            Dataset::Purchases.empty_records(locale),
        )
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn records(&self, dataset: Dataset) -> &RecordSet {
        match dataset {
            Dataset::Inventory => &self.inventory,
            Dataset::Sales => &self.sales,
            Dataset::Purchases => &self.purchases,
        }
    }

    fn column(&self, field: FieldKey) -> &'static str {
        field.display_name(self.locale)
    }

    fn named(&self, fields: Vec<(FieldKey, Value)>) -> Vec<(String, Value)> {
        fields
            .into_iter()
            .map(|(field, value)| (self.column(field).to_string(), value))
            .collect()
    }

    /// All inventory rows.
    ///
    /// Missing or non-numeric prices and stock read as zero.
    pub fn products(&self) -> Result<Vec<Product>, LedgerError> {
        let product_col = self.column(FieldKey::Product);
        if !self.inventory.has_column(product_col) && !self.inventory.rows.is_empty() {
            return Err(LedgerError::MissingColumn(product_col.to_string()));
        }

        let cost_col = self.column(FieldKey::CostPrice);
        let stock_col = self.column(FieldKey::Stock);
        Ok(self
            .inventory
            .records()
            .filter_map(|record| {
                let name = record.get(product_col)?.to_cell();
                Some(Product {
                    name,
                    cost_price: record.get(cost_col).and_then(Value::as_f64).unwrap_or(0.0),
                    stock: record.get(stock_col).and_then(Value::as_f64).unwrap_or(0.0),
                })
            })
            .collect())
    }

    /// Products that can currently be sold.
    pub fn available_products(&self) -> Result<Vec<Product>, LedgerError> {
        Ok(self
            .products()?
            .into_iter()
            .filter(|product| product.stock > 0.0)
            .collect())
    }

    /// Look up a product. Surrounding whitespace in `name` is ignored, as it
    /// is when the product is added.
    pub fn product(&self, name: &str) -> Result<Product, LedgerError> {
        let name = name.trim();
        self.products()?
            .into_iter()
            .find(|product| product.name == name)
            .ok_or_else(|| LedgerError::UnknownProduct(name.to_string()))
    }

    fn product_row(&self, name: &str) -> Result<usize, LedgerError> {
        let name = name.trim();
        let product_col = self.column(FieldKey::Product);
        self.inventory
            .column_values(product_col)
            .and_then(|mut values| values.position(|value| value.to_cell() == name))
            .ok_or_else(|| LedgerError::UnknownProduct(name.to_string()))
    }

    /// Localized stock listing, one "name: stock" line per product.
    pub fn stock_summary(&self) -> Result<String, LedgerError> {
        let strings = LocaleStrings::for_locale(self.locale);
        let products = self.products()?;
        if products.is_empty() {
            return Ok(strings.no_products_yet.to_string());
        }

        let mut out = format!("{}:", strings.current_stock);
        for product in products {
            out.push_str(&format!("\n  {}: {}", product.name, Value::Number(product.stock)));
        }
        Ok(out)
    }

    /// Add a new product to the inventory.
    pub fn add_product(&mut self, name: &str, cost_price: f64, stock: u32) -> Result<(), LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyProductName);
        }
        check_price(cost_price)?;
        if self.product_row(name).is_ok() {
            return Err(LedgerError::DuplicateProduct(name.to_string()));
        }

        let record = self.named(vec![
            (FieldKey::Product, name.into()),
            (FieldKey::CostPrice, cost_price.into()),
            (FieldKey::Stock, f64::from(stock).into()),
        ]);
        self.inventory.push_record(record);

        info!(product = %name, cost_price, stock, "Added product");
        Ok(())
    }

    /// Add stock to an existing product and log the purchase.
    ///
    /// The purchase price becomes the product's new cost price.
    pub fn restock(
        &mut self,
        name: &str,
        qty: u32,
        cost_price: f64,
        on: NaiveDateTime,
    ) -> Result<Product, LedgerError> {
        check_quantity(qty)?;
        check_price(cost_price)?;
        let row = self.product_row(name)?;
        let current = self.product(name)?;
        let stock = current.stock + f64::from(qty);

        let stock_col = self.column(FieldKey::Stock);
        let cost_col = self.column(FieldKey::CostPrice);
        ensure_column(&mut self.inventory, stock_col);
        ensure_column(&mut self.inventory, cost_col);
        self.inventory.set_value(row, stock_col, stock.into());
        self.inventory.set_value(row, cost_col, cost_price.into());

        let record = self.named(vec![
            (FieldKey::Date, on.into()),
            (FieldKey::Product, current.name.clone().into()),
            (FieldKey::Qty, f64::from(qty).into()),
            (FieldKey::CostPrice, cost_price.into()),
        ]);
        self.purchases.push_record(record);

        info!(product = %current.name, qty, cost_price, stock, "Restocked product");
        Ok(Product {
            name: current.name,
            cost_price,
            stock,
        })
    }

    /// Suggested selling price for a product.
    pub fn suggested_price(&self, name: &str) -> Result<f64, LedgerError> {
        Ok(self.product(name)?.cost_price * DEFAULT_MARKUP)
    }

    /// Record a sale and take the sold quantity out of stock.
    pub fn record_sale(
        &mut self,
        name: &str,
        qty: u32,
        unit_price: f64,
        on: NaiveDateTime,
    ) -> Result<Sale, LedgerError> {
        check_quantity(qty)?;
        check_price(unit_price)?;
        let row = self.product_row(name)?;
        let product = self.product(name)?;

        if product.stock < f64::from(qty) {
            return Err(LedgerError::InsufficientStock {
                product: product.name,
                requested: qty,
                available: product.stock,
            });
        }

        let quantity = f64::from(qty);
        let sale = Sale {
            product: product.name,
            qty,
            unit_price,
            total_price: unit_price * quantity,
            cost_price: product.cost_price,
            profit: (unit_price - product.cost_price) * quantity,
            date: on,
        };

        let record = self.named(vec![
            (FieldKey::Date, sale.date.into()),
            (FieldKey::Product, sale.product.clone().into()),
            (FieldKey::Qty, quantity.into()),
            (FieldKey::UnitPrice, sale.unit_price.into()),
            (FieldKey::TotalPrice, sale.total_price.into()),
            (FieldKey::CostPrice, sale.cost_price.into()),
            (FieldKey::Profit, sale.profit.into()),
        ]);
        self.sales.push_record(record);

        let stock_col = self.column(FieldKey::Stock);
        ensure_column(&mut self.inventory, stock_col);
        self.inventory
            .set_value(row, stock_col, (product.stock - quantity).into());

        debug!(product = %sale.product, qty, total = sale.total_price, profit = sale.profit, "Recorded sale");
        Ok(sale)
    }
}

fn ensure_column(records: &mut RecordSet, name: &str) {
    if !records.has_column(name) {
        records.push_column(name, Value::Number(0.0));
    }
}

fn check_quantity(qty: u32) -> Result<(), LedgerError> {
    if qty == 0 {
        return Err(LedgerError::InvalidQuantity);
    }
    Ok(())
}

fn check_price(price: f64) -> Result<(), LedgerError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(LedgerError::InvalidPrice(price));
    }
    Ok(())
}
