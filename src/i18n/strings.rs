use crate::i18n::Locale;

/// All localized user-facing strings for a locale
///
/// Placeholders use `{name}` syntax and are filled with `str::replace`.
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    // ==================== Report Headers ====================
    /// Title shown at the top of every report
    pub app_title: &'static str,

    /// Heading for the "today" report
    pub today_sales: &'static str,

    /// Heading for the last-7-days report
    pub last_7_days: &'static str,

    /// Heading for the current-month report
    pub this_month: &'static str,

    // ==================== Metrics ====================
    pub todays_revenue: &'static str,
    pub estimated_profit: &'static str,
    pub total_revenue: &'static str,
    pub total_profit: &'static str,

    /// Placeholders: {count}
    pub sales_count: &'static str,

    // ==================== Empty States ====================
    pub no_sales_today: &'static str,
    pub no_data_weekly: &'static str,
    pub no_data_monthly: &'static str,
    pub no_products_yet: &'static str,

    // ==================== Ledger Messages ====================
    /// Placeholders: {product}
    pub add_product_success: &'static str,

    /// Placeholders: {qty}, {product}
    pub restock_success: &'static str,

    /// Placeholders: {qty}, {product}
    pub sale_success: &'static str,

    pub not_enough_stock: &'static str,

    // ==================== Inventory ====================
    pub current_stock: &'static str,

    /// Placeholders: {user}
    pub logged_in_as: &'static str,
}

impl LocaleStrings {
    /// Strings for the given locale.
    pub fn for_locale(locale: Locale) -> &'static LocaleStrings {
        if locale == Locale::ENGLISH {
            &ENGLISH_STRINGS
        } else {
            &SWAHILI_STRINGS
        }
    }
}

// ==================== Swahili Strings ====================

/// Swahili strings (default locale)
pub const SWAHILI_STRINGS: LocaleStrings = LocaleStrings {
    app_title: "Duka Mkononi",
    today_sales: "Mauzo ya Leo",
    last_7_days: "Siku 7 zilizopita",
    this_month: "Mwezi huu",

    todays_revenue: "Mapato ya Leo",
    estimated_profit: "Faida ya Leo",
    total_revenue: "Jumla ya mapato",
    total_profit: "Jumla ya faida",
    sales_count: "Idadi ya mauzo: {count}",

    no_sales_today: "Hakuna mauzo leo",
    no_data_weekly: "Hakuna data ya wiki hii",
    no_data_monthly: "Hakuna data ya mwezi huu",
    no_products_yet: "Hakuna bidhaa bado",

    add_product_success: "{product} imeongezwa kikamilifu",
    restock_success: "{qty} {product} zimeongezwa kwenye hifadhi",
    sale_success: "{qty} {product} zimeuzwa kikamilifu",
    not_enough_stock: "Hakuna hifadhi ya kutosha!",

    current_stock: "Hifadhi ya sasa",
    logged_in_as: "Umeingia kama: {user}",
};

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LocaleStrings = LocaleStrings {
    app_title: "Duka Mkononi",
    today_sales: "Today's Sales",
    last_7_days: "Last 7 days",
    this_month: "This month",

    todays_revenue: "Today's Revenue",
    estimated_profit: "Estimated Profit",
    total_revenue: "Total revenue",
    total_profit: "Total profit",
    sales_count: "Number of sales: {count}",

    no_sales_today: "No sales today",
    no_data_weekly: "No weekly data available",
    no_data_monthly: "No monthly data available",
    no_products_yet: "No products yet",

    add_product_success: "{product} was added successfully",
    restock_success: "{qty} {product} were added to inventory",
    sale_success: "{qty} {product} sold successfully",
    not_enough_stock: "Not enough stock available!",

    current_stock: "Current stock",
    logged_in_as: "Logged in as: {user}",
};
