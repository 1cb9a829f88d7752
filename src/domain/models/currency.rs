//! Currency catalog and country/flag resolution.
//!
//! The built-in catalog is the default dataset and the search fallback
//! when the backend listing is unavailable. It is constructed explicitly
//! rather than held in a global so the hosting application owns its
//! lifetime.

use serde::{Deserialize, Serialize};

/// Base URL for flag images, keyed by 2-letter country code.
pub const FLAG_CDN_BASE: &str = "https://flagcdn.com/48x36";

/// Country code used when no flag exists for a currency.
pub const FALLBACK_FLAG_COUNTRY: &str = "un";

/// A currency known to the converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    /// 3-letter currency code, unique within a catalog.
    pub code: String,
    /// Human-readable display name.
    pub name: String,
    /// 2-letter country code used to resolve a flag image.
    pub country: String,
}

impl CurrencyRecord {
    /// Create a record from borrowed parts.
    pub fn new(code: &str, name: &str, country: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            country: country.to_string(),
        }
    }

    /// URL of this currency's flag image.
    pub fn flag_url(&self) -> String {
        flag_url(&self.country)
    }
}

/// A currency as listed by the backend, without country resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedCurrency {
    /// 3-letter currency code.
    pub code: String,
    /// Human-readable display name.
    pub name: String,
}

/// A geographic grouping of currency codes from the regions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Region display name.
    pub name: String,
    /// Currency codes belonging to the region.
    pub currencies: Vec<String>,
}

/// The built-in 35-currency catalog, in display order.
pub fn builtin_catalog() -> Vec<CurrencyRecord> {
    [
        ("USD", "US Dollar", "us"),
        ("EUR", "Euro", "fr"),
        ("GBP", "British Pound", "gb"),
        ("JPY", "Japanese Yen", "jp"),
        ("AUD", "Australian Dollar", "au"),
        ("CAD", "Canadian Dollar", "ca"),
        ("CHF", "Swiss Franc", "ch"),
        ("CNY", "Chinese Yuan", "cn"),
        ("SEK", "Swedish Krona", "se"),
        ("NZD", "New Zealand Dollar", "nz"),
        ("MXN", "Mexican Peso", "mx"),
        ("SGD", "Singapore Dollar", "sg"),
        ("HKD", "Hong Kong Dollar", "hk"),
        ("NOK", "Norwegian Krone", "no"),
        ("KRW", "South Korean Won", "kr"),
        ("TRY", "Turkish Lira", "tr"),
        ("RUB", "Russian Ruble", "ru"),
        ("INR", "Indian Rupee", "in"),
        ("BRL", "Brazilian Real", "br"),
        ("ZAR", "South African Rand", "za"),
        ("DKK", "Danish Krone", "dk"),
        ("PLN", "Polish Zloty", "pl"),
        ("TWD", "Taiwan Dollar", "tw"),
        ("THB", "Thai Baht", "th"),
        ("IDR", "Indonesian Rupiah", "id"),
        ("HUF", "Hungarian Forint", "hu"),
        ("CZK", "Czech Koruna", "cz"),
        ("ILS", "Israeli Shekel", "il"),
        ("CLP", "Chilean Peso", "cl"),
        ("PHP", "Philippine Peso", "ph"),
        ("AED", "UAE Dirham", "ae"),
        ("COP", "Colombian Peso", "co"),
        ("SAR", "Saudi Riyal", "sa"),
        ("MYR", "Malaysian Ringgit", "my"),
        ("RON", "Romanian Leu", "ro"),
    ]
    .iter()
    .map(|(code, name, country)| CurrencyRecord::new(code, name, country))
    .collect()
}

/// Resolve the 2-letter country code for a currency code.
///
/// Falls back to the first two letters of the code, lower-cased, when
/// the catalog has no entry for it.
pub fn country_for_code(catalog: &[CurrencyRecord], code: &str) -> String {
    catalog
        .iter()
        .find(|c| c.code == code)
        .map(|c| c.country.clone())
        .unwrap_or_else(|| {
            code.chars()
                .take(2)
                .collect::<String>()
                .to_lowercase()
        })
}

/// Build a flag image URL for a 2-letter country code.
pub fn flag_url(country: &str) -> String {
    format!("{FLAG_CDN_BASE}/{country}.png")
}

/// Flag URL served when the country-specific image is missing.
pub fn fallback_flag_url() -> String {
    flag_url(FALLBACK_FLAG_COUNTRY)
}
