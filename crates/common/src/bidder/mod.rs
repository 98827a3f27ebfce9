//! Bidder adapter framework.
//!
//! This module defines the contract between a header-bidding host and the
//! vendor adapters it drives: the request/response types, the
//! [`BidderAdapter`] trait and a registry that resolves adapters by bidder
//! code or alias.
//!
//! Note: Individual adapters are located in the `integrations` module
//! (e.g., `crate::integrations::adgeneration`).

use crate::settings::Settings;
use std::sync::Arc;

pub mod adapter;
pub mod native;
pub mod registry;
pub mod types;

pub use adapter::{AdapterContext, BidderAdapter};
pub use registry::BidderRegistry;
pub use types::{
    Bid, BidRequest, BidderRequest, Creative, MediaType, NativeAd, ServerRequest, ServerResponse,
    SyncOptions, UserSync,
};

/// Type alias for adapter builder functions.
type AdapterBuilder = fn(&Settings) -> Vec<Arc<dyn BidderAdapter>>;

/// Returns the list of all available adapter builder functions.
///
/// Each builder function checks the settings for its specific adapter
/// configuration and returns any enabled adapters.
fn adapter_builders() -> &'static [AdapterBuilder] {
    &[crate::integrations::adgeneration::register_adapters]
}

/// Build a registry holding every adapter enabled in `settings`.
#[must_use]
pub fn build_registry(settings: &Settings) -> BidderRegistry {
    log::info!("Building bidder registry");

    let mut registry = BidderRegistry::new();

    for builder in adapter_builders() {
        for adapter in builder(settings) {
            registry.register(adapter);
        }
    }

    log::info!("Bidder registry built with {} adapters", registry.len());

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_registry_registers_adgeneration() {
        let settings = Settings::default();
        let registry = build_registry(&settings);

        assert_eq!(registry.len(), 1);
        let adapter = registry.get("adgeneration").expect("code should resolve");
        assert_eq!(adapter.code(), "adgeneration");
        let alias = registry.get("adg").expect("alias should resolve");
        assert_eq!(alias.code(), "adgeneration");
    }

    #[test]
    fn test_build_registry_skips_disabled_adapter() {
        let settings = Settings::from_toml(
            r#"
            [adgeneration]
            enabled = false
            "#,
        )
        .expect("should load");

        let registry = build_registry(&settings);
        assert!(registry.is_empty());
        assert!(registry.get("adg").is_none());
    }
}
