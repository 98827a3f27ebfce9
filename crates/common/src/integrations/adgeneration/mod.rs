//! AdGeneration (Supership) bidder adapter.
//!
//! Builds one GET request per bid request against the AdGeneration ad
//! server and turns its `json3` responses into banner or native bids.

use std::sync::Arc;

use crate::bidder::native::convert_ortb_request_to_proprietary_native;
use crate::bidder::types::{
    Bid, BidRequest, BidderRequest, HttpMethod, MediaType, ServerRequest, ServerResponse,
};
use crate::bidder::{AdapterContext, BidderAdapter};
use crate::config_store::ConfigStore;
use crate::constants::{
    ADGENERATION_ALIASES, ADGENERATION_BIDDER_CODE, AD_SERVER_CURRENCY_KEY,
};
use crate::settings::{AdGenerationSettings, Settings};

pub mod identity;
mod markup;
mod request;
mod response;

use request::{build_query, QueryContext};
use response::{decode_body, interpret_body};

const SUPPORTED_MEDIA_TYPES: &[MediaType] = &[MediaType::Banner, MediaType::Native];

/// Resolve the bid currency from the host's ad server currency.
///
/// Anything other than `usd` (any case) resolves to `JPY`.
#[must_use]
pub fn resolve_currency(config: &dyn ConfigStore) -> &'static str {
    match config.get(AD_SERVER_CURRENCY_KEY) {
        Some(currency) if currency.eq_ignore_ascii_case("usd") => "USD",
        _ => "JPY",
    }
}

/// AdGeneration bidder adapter.
pub struct AdGenerationAdapter {
    config: AdGenerationSettings,
}

impl AdGenerationAdapter {
    /// Create a new AdGeneration adapter.
    #[must_use]
    pub fn new(config: AdGenerationSettings) -> Self {
        Self { config }
    }

    fn endpoint_for(&self, request: &BidRequest) -> &str {
        if request.params.debug {
            &self.config.debug_endpoint
        } else {
            &self.config.endpoint
        }
    }
}

impl BidderAdapter for AdGenerationAdapter {
    fn code(&self) -> &'static str {
        ADGENERATION_BIDDER_CODE
    }

    fn aliases(&self) -> &'static [&'static str] {
        ADGENERATION_ALIASES
    }

    fn supported_media_types(&self) -> &'static [MediaType] {
        SUPPORTED_MEDIA_TYPES
    }

    fn is_bid_request_valid(&self, bid: &BidRequest) -> bool {
        bid.params.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    fn build_requests(
        &self,
        valid_bid_requests: &[BidRequest],
        bidder_request: &BidderRequest,
        context: &AdapterContext<'_>,
    ) -> Vec<ServerRequest> {
        let bid_requests = convert_ortb_request_to_proprietary_native(valid_bid_requests);

        let currency = resolve_currency(context.config);
        let query_context = QueryContext {
            currency,
            prebid_version: &self.config.prebid_version,
            page_url: bidder_request.referer_info.page.as_deref(),
            is_ios: context.platform.is_ios(),
        };

        log::info!(
            "AdGeneration: building {} requests (currency: {})",
            bid_requests.len(),
            currency
        );

        bid_requests
            .into_iter()
            .map(|bid_request| {
                let data = build_query(&bid_request, &query_context);
                log::debug!("AdGeneration: query for '{}': {}", bid_request.bid_id, data);
                ServerRequest {
                    method: HttpMethod::Get,
                    url: self.endpoint_for(&bid_request).to_string(),
                    data,
                    bid_request,
                }
            })
            .collect()
    }

    fn interpret_response(
        &self,
        response: &ServerResponse,
        request: &ServerRequest,
        context: &AdapterContext<'_>,
    ) -> Vec<Bid> {
        let body = match decode_body(&response.body) {
            Ok(body) => body,
            Err(e) => {
                log::warn!("AdGeneration: dropping undecodable response: {:?}", e);
                return Vec::new();
            }
        };

        let currency = resolve_currency(context.config);
        interpret_body(&body, &request.bid_request, currency)
            .into_iter()
            .collect()
    }
}

/// Register the AdGeneration adapter when enabled in `settings`.
#[must_use]
pub fn register_adapters(settings: &Settings) -> Vec<Arc<dyn BidderAdapter>> {
    let config = &settings.adgeneration;
    if !config.enabled {
        log::debug!("AdGeneration adapter is disabled");
        return Vec::new();
    }

    log::info!(
        "Registering AdGeneration adapter (endpoint: {}, debug endpoint: {})",
        config.endpoint,
        config.debug_endpoint
    );
    vec![Arc::new(AdGenerationAdapter::new(config.clone()))]
}
