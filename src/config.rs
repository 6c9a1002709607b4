//! Station configuration read from the environment at start-up.

use std::env;

use crate::printer::MIN_WIDTH;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOCATION_ID: i32 = 1;
const DEFAULT_LOCATION_NAME: &str = "Main";
const DEFAULT_CURRENCY_SYMBOL: &str = "₦";
const DEFAULT_RECEIPT_WIDTH: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    pub location_id: i32,
    pub location_name: String,
    pub operator_name: String,
    /// Sync is disabled when unset.
    pub sync_api_url: Option<String>,
    /// Printing fails with "printer not configured" when unset.
    pub printer_device: Option<String>,
    pub currency_symbol: String,
    pub receipt_width: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Blank values count as
    /// unset and unparsable numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let string_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            database_url: string_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            address: string_or("ADDRESS", DEFAULT_ADDRESS),
            port: get("PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            location_id: get("LOCATION_ID")
                .and_then(|value| value.parse().ok())
                .filter(|id| *id > 0)
                .unwrap_or(DEFAULT_LOCATION_ID),
            location_name: string_or("LOCATION_NAME", DEFAULT_LOCATION_NAME),
            operator_name: get("OPERATOR_NAME").unwrap_or_default(),
            sync_api_url: get("SYNC_API_URL"),
            printer_device: get("PRINTER_DEVICE"),
            currency_symbol: string_or("CURRENCY_SYMBOL", DEFAULT_CURRENCY_SYMBOL),
            receipt_width: get("RECEIPT_WIDTH")
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_RECEIPT_WIDTH)
                .max(MIN_WIDTH),
        }
    }
}
