//! Host configuration access.
//!
//! The adapter reads a small amount of host configuration (currently only the
//! ad server currency) on every call. Hosts expose it through [`ConfigStore`]
//! so nothing in the adapter reaches for process-wide state.
//!
//! # Keys
//!
//! - `currency.adServerCurrency` - ISO currency code the host auctions in

use std::collections::HashMap;

use crate::constants::AD_SERVER_CURRENCY_KEY;
use crate::settings::Settings;

/// Read-only view of host configuration.
pub trait ConfigStore: Send + Sync {
    /// Retrieve a value by dotted key.
    ///
    /// Returns `None` when the key is not configured.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory store, used by tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigStore {
    values: HashMap<String, String>,
}

impl StaticConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigStore for StaticConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl ConfigStore for Settings {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            AD_SERVER_CURRENCY_KEY => self.currency.ad_server_currency.clone(),
            _ => None,
        }
    }
}
