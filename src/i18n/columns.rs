//! Field keys and the per-locale column name tables.
//!
//! Data files name their columns in the operator's language. A `FieldKey`
//! is the locale-independent identity of a column; the tables below map
//! each key to its display name in every locale. Both tables are total over
//! the same key set.

use crate::i18n::Locale;
use serde::Serialize;
use std::fmt;

/// Locale-independent identifier for a business attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Product,
    CostPrice,
    Stock,
    Date,
    Qty,
    UnitPrice,
    TotalPrice,
    Profit,
    SalePrice,
}

impl FieldKey {
    /// Every field key, in table order.
    pub const ALL: [FieldKey; 9] = [
        FieldKey::Product,
        FieldKey::CostPrice,
        FieldKey::Stock,
        FieldKey::Date,
        FieldKey::Qty,
        FieldKey::UnitPrice,
        FieldKey::TotalPrice,
        FieldKey::Profit,
        FieldKey::SalePrice,
    ];

    /// Fields every migrated record set must carry (backfilled if absent).
    pub const REQUIRED: [FieldKey; 4] = [
        FieldKey::Product,
        FieldKey::CostPrice,
        FieldKey::Stock,
        FieldKey::Date,
    ];

    /// Stable snake_case key (e.g., "cost_price").
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Product => "product",
            FieldKey::CostPrice => "cost_price",
            FieldKey::Stock => "stock",
            FieldKey::Date => "date",
            FieldKey::Qty => "qty",
            FieldKey::UnitPrice => "unit_price",
            FieldKey::TotalPrice => "total_price",
            FieldKey::Profit => "profit",
            FieldKey::SalePrice => "sale_price",
        }
    }

    /// Column name for this field in the given locale.
    pub fn display_name(&self, locale: Locale) -> &'static str {
        if locale == Locale::ENGLISH {
            self.english_name()
        } else {
            self.swahili_name()
        }
    }

    /// Reverse lookup: which field does `name` denote in `locale`?
    pub fn from_display_name(name: &str, locale: Locale) -> Option<FieldKey> {
        Self::ALL
            .into_iter()
            .find(|field| field.display_name(locale) == name)
    }

    fn swahili_name(&self) -> &'static str {
        match self {
            FieldKey::Product => "Bidhaa",
            FieldKey::CostPrice => "Bei_ya_ununuzi",
            FieldKey::Stock => "Hifadhi",
            FieldKey::Date => "Tarehe",
            FieldKey::Qty => "Idadi",
            FieldKey::UnitPrice => "Bei_ya_rejareja",
            FieldKey::TotalPrice => "Jumla_bei",
            FieldKey::Profit => "Faida",
            FieldKey::SalePrice => "Bei_ya_mauzo",
        }
    }

    fn english_name(&self) -> &'static str {
        match self {
            FieldKey::Qty => "quantity",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display names for `fields` in `locale`, preserving order.
pub fn column_names(fields: &[FieldKey], locale: Locale) -> Vec<String> {
    fields
        .iter()
        .map(|field| field.display_name(locale).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables_cover_every_key_in_both_locales() {
        for locale in Locale::all() {
            let names: HashSet<_> = FieldKey::ALL
                .iter()
                .map(|field| field.display_name(locale))
                .collect();
            // Bijection: no two keys share a display name
            assert_eq!(names.len(), FieldKey::ALL.len(), "locale {}", locale);
        }
    }

    #[test]
    fn test_swahili_names() {
        assert_eq!(FieldKey::Product.display_name(Locale::SWAHILI), "Bidhaa");
        assert_eq!(
            FieldKey::CostPrice.display_name(Locale::SWAHILI),
            "Bei_ya_ununuzi"
        );
        assert_eq!(FieldKey::Stock.display_name(Locale::SWAHILI), "Hifadhi");
        assert_eq!(FieldKey::Date.display_name(Locale::SWAHILI), "Tarehe");
    }

    #[test]
    fn test_english_qty_is_quantity() {
        assert_eq!(FieldKey::Qty.display_name(Locale::ENGLISH), "quantity");
        assert_eq!(FieldKey::Qty.as_str(), "qty");
    }

    #[test]
    fn test_from_display_name_round_trips() {
        for locale in Locale::all() {
            for field in FieldKey::ALL {
                let name = field.display_name(locale);
                assert_eq!(FieldKey::from_display_name(name, locale), Some(field));
            }
        }
    }

    #[test]
    fn test_from_display_name_is_locale_specific() {
        assert_eq!(FieldKey::from_display_name("Bidhaa", Locale::ENGLISH), None);
        assert_eq!(FieldKey::from_display_name("product", Locale::SWAHILI), None);
    }

    #[test]
    fn test_required_fields() {
        assert!(FieldKey::REQUIRED.contains(&FieldKey::Date));
        assert!(!FieldKey::REQUIRED.contains(&FieldKey::Profit));
    }

    #[test]
    fn test_column_names_preserve_order() {
        let names = column_names(
            &[FieldKey::Date, FieldKey::Product, FieldKey::Qty],
            Locale::ENGLISH,
        );
        assert_eq!(names, vec!["date", "product", "quantity"]);
    }
}
