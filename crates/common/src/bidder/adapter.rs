//! Trait definition for bidder adapters.

use crate::config_store::ConfigStore;
use crate::platform::PlatformDetector;

use super::types::{
    Bid, BidRequest, BidderRequest, MediaType, ServerRequest, ServerResponse, SyncOptions,
    UserSync,
};

/// Host collaborators passed to adapters on every call.
pub struct AdapterContext<'a> {
    /// Host configuration (currency and friends)
    pub config: &'a dyn ConfigStore,
    /// Device platform of the auction
    pub platform: &'a dyn PlatformDetector,
}

impl<'a> AdapterContext<'a> {
    #[must_use]
    pub fn new(config: &'a dyn ConfigStore, platform: &'a dyn PlatformDetector) -> Self {
        Self { config, platform }
    }
}

/// Trait implemented by all bidder adapters.
///
/// Every method is a synchronous transform. Adapters never perform network
/// I/O: `build_requests` describes the calls and the host executes them.
pub trait BidderAdapter: Send + Sync {
    /// Bidder code this adapter registers under (e.g. "adgeneration").
    fn code(&self) -> &'static str;

    /// Additional codes resolving to this adapter.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Ad formats this adapter can bid on.
    fn supported_media_types(&self) -> &'static [MediaType] {
        &[MediaType::Banner]
    }

    /// Check if this adapter supports a specific media type.
    fn supports_media_type(&self, media_type: MediaType) -> bool {
        self.supported_media_types().contains(&media_type)
    }

    /// Decide whether a bid request carries enough parameters to bid on.
    fn is_bid_request_valid(&self, bid: &BidRequest) -> bool;

    /// Turn validated bid requests into HTTP request descriptors.
    fn build_requests(
        &self,
        valid_bid_requests: &[BidRequest],
        bidder_request: &BidderRequest,
        context: &AdapterContext<'_>,
    ) -> Vec<ServerRequest>;

    /// Convert a completed response for `request` into bids.
    ///
    /// An empty list means "no bid"; it is not an error.
    fn interpret_response(
        &self,
        response: &ServerResponse,
        request: &ServerRequest,
        context: &AdapterContext<'_>,
    ) -> Vec<Bid>;

    /// User sync pixels or iframes to drop after the auction.
    fn get_user_syncs(
        &self,
        _sync_options: &SyncOptions,
        _responses: &[ServerResponse],
    ) -> Vec<UserSync> {
        Vec::new()
    }
}
