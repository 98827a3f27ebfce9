use std::collections::HashMap;
use std::sync::Arc;

use super::adapter::BidderAdapter;

/// Registered bidder adapters, addressable by code or alias.
#[derive(Default)]
pub struct BidderRegistry {
    adapters: Vec<Arc<dyn BidderAdapter>>,
    by_code: HashMap<&'static str, usize>,
}

impl BidderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its code and every alias.
    ///
    /// A later registration for an already known code replaces the mapping.
    pub fn register(&mut self, adapter: Arc<dyn BidderAdapter>) {
        let index = self.adapters.len();
        let codes = std::iter::once(adapter.code()).chain(adapter.aliases().iter().copied());
        for code in codes {
            if self.by_code.insert(code, index).is_some() {
                log::warn!("Bidder code '{}' registered twice, replacing", code);
            }
        }
        log::debug!(
            "Registered bidder '{}' (aliases: {:?})",
            adapter.code(),
            adapter.aliases()
        );
        self.adapters.push(adapter);
    }

    /// Look up an adapter by bidder code or alias.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<Arc<dyn BidderAdapter>> {
        self.by_code
            .get(code)
            .and_then(|&index| self.adapters.get(index))
            .cloned()
    }

    /// Every code and alias the registry resolves, sorted.
    #[must_use]
    pub fn codes(&self) -> Vec<&'static str> {
        let mut codes: Vec<_> = self.by_code.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
