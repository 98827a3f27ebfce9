//! Offline `build` and `interpret` commands.
//!
//! Both commands drive a registered adapter exactly as a host would, reading
//! the host-side documents from JSON files and printing the adapter output.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use adgeneration_common::bidder::{
    build_registry, AdapterContext, Bid, BidRequest, BidderAdapter, BidderRequest, ServerRequest,
    ServerResponse,
};
use adgeneration_common::config_store::{ConfigStore, StaticConfigStore};
use adgeneration_common::constants::AD_SERVER_CURRENCY_KEY;
use adgeneration_common::platform::UserAgentPlatform;
use adgeneration_common::settings::Settings;
use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Host-side knobs shared by both commands.
pub struct HostOptions {
    pub bidder: String,
    pub user_agent: Option<String>,
    pub currency: Option<String>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::Input(format!("{}: {}", path.display(), e)))
}

fn resolve_adapter(settings: &Settings, bidder: &str) -> Result<Arc<dyn BidderAdapter>, CliError> {
    build_registry(settings)
        .get(bidder)
        .ok_or_else(|| CliError::UnknownBidder(bidder.to_string()))
}

/// Currency override from the command line, falling back to settings.
fn config_store(settings: &Settings, currency: Option<&str>) -> Box<dyn ConfigStore> {
    match currency {
        Some(currency) => {
            Box::new(StaticConfigStore::new().with_value(AD_SERVER_CURRENCY_KEY, currency))
        }
        None => Box::new(settings.clone()),
    }
}

/// Build request descriptors for the valid bid requests in `requests_file`.
pub fn build(
    settings: &Settings,
    options: &HostOptions,
    requests_file: &Path,
    bidder_request_file: Option<&Path>,
) -> Result<Vec<ServerRequest>, CliError> {
    let adapter = resolve_adapter(settings, &options.bidder)?;
    let bid_requests: Vec<BidRequest> = read_json(requests_file)?;
    let bidder_request: BidderRequest = match bidder_request_file {
        Some(path) => read_json(path)?,
        None => BidderRequest::default(),
    };

    let total = bid_requests.len();
    let valid: Vec<BidRequest> = bid_requests
        .into_iter()
        .filter(|bid| adapter.is_bid_request_valid(bid))
        .collect();
    if valid.len() < total {
        log::warn!(
            "Dropped {} of {} bid requests failing {} validation",
            total - valid.len(),
            total,
            adapter.code()
        );
    }

    let config = config_store(settings, options.currency.as_deref());
    let platform = UserAgentPlatform::new(options.user_agent.clone());
    let context = AdapterContext::new(&*config, &platform);

    Ok(adapter.build_requests(&valid, &bidder_request, &context))
}

/// Interpret the response in `response_file` against the descriptor in
/// `request_file`.
pub fn interpret(
    settings: &Settings,
    options: &HostOptions,
    request_file: &Path,
    response_file: &Path,
) -> Result<Vec<Bid>, CliError> {
    let adapter = resolve_adapter(settings, &options.bidder)?;
    let request: ServerRequest = read_json(request_file)?;
    let response = ServerResponse {
        body: read_json(response_file)?,
    };

    let config = config_store(settings, options.currency.as_deref());
    let platform = UserAgentPlatform::new(options.user_agent.clone());
    let context = AdapterContext::new(&*config, &platform);

    Ok(adapter.interpret_response(&response, &request, &context))
}
