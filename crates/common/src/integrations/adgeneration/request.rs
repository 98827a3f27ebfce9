//! Ad server query string construction.

use serde_json::Value as Json;

use crate::bidder::types::BidRequest;
use crate::constants::{ADGENERATION_ADAPTER_VERSION, SDK_NAME};
use crate::http_util::{strip_trailing_ampersand, try_append_query_string};

use super::identity;

/// Per-batch values shared by every query built for it.
pub(super) struct QueryContext<'a> {
    pub currency: &'a str,
    pub prebid_version: &'a str,
    pub page_url: Option<&'a str>,
    pub is_ios: bool,
}

/// Render `sizes` as `WxH` entries joined by commas.
///
/// Returns `None` for an empty list or when any entry is not a numeric
/// `[width, height]` pair.
pub(super) fn get_sizes(sizes: &[Json]) -> Option<String> {
    if sizes.is_empty() {
        return None;
    }

    let mut joined = String::new();
    for size in sizes {
        let Some((width, height)) = size_pair(size) else {
            log::debug!("AdGeneration: ignoring malformed sizes {:?}", sizes);
            return None;
        };
        joined.push_str(&format!("{width}x{height},"));
    }

    if joined.ends_with(',') {
        joined.pop();
    }
    Some(joined)
}

fn size_pair(size: &Json) -> Option<(u64, u64)> {
    match size.as_array()?.as_slice() {
        [width, height] => Some((width.as_u64()?, height.as_u64()?)),
        _ => None,
    }
}

/// Build the query string for a single bid request.
pub(super) fn build_query(request: &BidRequest, context: &QueryContext<'_>) -> String {
    let mut query = String::new();

    try_append_query_string(&mut query, "posall", Some("SSPLOC"));
    try_append_query_string(&mut query, "id", request.params.id.as_deref());
    try_append_query_string(&mut query, "sdktype", Some("0"));
    try_append_query_string(&mut query, "hb", Some("true"));
    try_append_query_string(&mut query, "t", Some("json3"));
    try_append_query_string(&mut query, "transactionid", request.transaction_id.as_deref());
    try_append_query_string(&mut query, "sizes", get_sizes(&request.sizes).as_deref());
    try_append_query_string(&mut query, "currency", Some(context.currency));
    try_append_query_string(&mut query, "pbver", Some(context.prebid_version));
    try_append_query_string(&mut query, "sdkname", Some(SDK_NAME));
    try_append_query_string(&mut query, "adapterver", Some(ADGENERATION_ADAPTER_VERSION));
    try_append_query_string(&mut query, "adgext_criteo_id", identity::criteo_id(request));
    try_append_query_string(&mut query, "adgext_id5_id", identity::id5_id(request));
    try_append_query_string(
        &mut query,
        "adgext_id5_id_link_type",
        identity::id5_link_type(request),
    );
    if !request.has_native() {
        try_append_query_string(&mut query, "imark", Some("1"));
    }
    try_append_query_string(&mut query, "tp", context.page_url);
    if context.is_ios {
        try_append_query_string(&mut query, "hyper_id", identity::hyper_id(request));
    }

    strip_trailing_ampersand(&mut query);
    query
}
