//! AdGeneration ad server response decoding.

use error_stack::{Report, ResultExt};
use serde::Deserialize;
use serde_json::Value as Json;

use crate::bidder::types::{
    deserialize_truthy_string, Bid, BidMeta, BidRequest, Creative, MediaType, NativeAd,
    NativeImage,
};
use crate::constants::DEFAULT_BID_TTL_SECS;
use crate::error::AdapterError;
use crate::http_util::encode_uri_component;

use super::markup::create_ad;

// ============================================================================
// AdGeneration API Types
// ============================================================================

/// Ad server response body (`t=json3`).
#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct AdgResponseBody {
    /// Matched ads; absent or empty means no bid
    #[serde(default)]
    pub results: Option<Vec<Json>>,

    #[serde(default)]
    pub cpm: Option<f64>,

    #[serde(default)]
    pub w: Option<u32>,

    #[serde(default)]
    pub h: Option<u32>,

    #[serde(default, deserialize_with = "deserialize_truthy_string")]
    pub creativeid: Option<String>,

    #[serde(default, deserialize_with = "deserialize_truthy_string")]
    pub dealid: Option<String>,

    /// Advertiser domains; only a non-empty array is reported
    #[serde(default)]
    pub adomain: Option<Json>,

    #[serde(default)]
    pub ttl: Option<u32>,

    /// Banner HTML
    #[serde(default)]
    pub ad: Option<String>,

    /// VAST document for outstream video placements
    #[serde(default)]
    pub vastxml: Option<String>,

    /// Tracking markup inserted into banner HTML
    #[serde(default)]
    pub beacon: Option<String>,

    /// Impression tracker URL for native ads
    #[serde(default)]
    pub beaconurl: Option<String>,

    #[serde(default)]
    pub native_ad: Option<AdgNativeAd>,

    #[serde(default)]
    pub location_params: Option<AdgLocationParams>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct AdgNativeAd {
    #[serde(default)]
    pub assets: Vec<AdgNativeAsset>,
    #[serde(default)]
    pub link: Option<AdgNativeLink>,
    #[serde(default)]
    pub imptrackers: Option<Vec<String>>,
}

/// A native asset; `id` selects which payload object is meaningful.
#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct AdgNativeAsset {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub title: Option<AdgNativeTitle>,
    #[serde(default)]
    pub img: Option<AdgNativeImage>,
    #[serde(default)]
    pub data: Option<AdgNativeData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct AdgNativeTitle {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct AdgNativeImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub h: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct AdgNativeData {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct AdgNativeLink {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub clicktrackers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct AdgLocationParams {
    #[serde(default)]
    pub option: Option<AdgLocationOption>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct AdgLocationOption {
    #[serde(default)]
    pub ad_type: Option<String>,
}

// Native asset ids
const ASSET_TITLE: u32 = 1;
const ASSET_IMAGE: u32 = 2;
const ASSET_ICON: u32 = 3;
const ASSET_SPONSORED_BY: u32 = 4;
const ASSET_BODY: u32 = 5;
const ASSET_CTA: u32 = 6;
const ASSET_PRIVACY_LINK: u32 = 502;

// ============================================================================
// Interpretation
// ============================================================================

/// Decode the raw response body into the vendor format.
pub(super) fn decode_body(body: &Json) -> Result<AdgResponseBody, Report<AdapterError>> {
    AdgResponseBody::deserialize(body).change_context(AdapterError::InvalidResponse {
        message: "Failed to decode AdGeneration response body".to_string(),
    })
}

/// Turn a decoded body into at most one bid for `bid_request`.
pub(super) fn interpret_body(
    body: &AdgResponseBody,
    bid_request: &BidRequest,
    currency: &str,
) -> Option<Bid> {
    if body.results.as_ref().is_none_or(Vec::is_empty) {
        log::debug!("AdGeneration: no results for bid '{}'", bid_request.bid_id);
        return None;
    }

    let (creative, media_type) = match native_assets(body) {
        Some(native_ad) => (
            Creative::Native(create_native_ad(native_ad, body.beaconurl.as_deref())),
            Some(MediaType::Native),
        ),
        None => (Creative::Banner(create_ad(body, bid_request)), None),
    };

    Some(Bid {
        request_id: bid_request.bid_id.clone(),
        cpm: body.cpm.unwrap_or(0.0),
        width: body.w.filter(|&w| w != 0).unwrap_or(1),
        height: body.h.filter(|&h| h != 0).unwrap_or(1),
        creative_id: body.creativeid.clone().unwrap_or_default(),
        deal_id: body.dealid.clone().unwrap_or_default(),
        currency: currency.to_string(),
        net_revenue: true,
        ttl: body.ttl.filter(|&ttl| ttl != 0).unwrap_or(DEFAULT_BID_TTL_SECS),
        creative,
        media_type,
        meta: advertiser_meta(body.adomain.as_ref()),
    })
}

fn advertiser_meta(adomain: Option<&Json>) -> Option<BidMeta> {
    let domains = adomain?.as_array().filter(|domains| !domains.is_empty())?;
    let advertiser_domains = domains
        .iter()
        .map(|domain| match domain {
            Json::String(domain) => domain.clone(),
            other => other.to_string(),
        })
        .collect();
    Some(BidMeta { advertiser_domains })
}

/// The native section, when it carries at least one asset.
fn native_assets(body: &AdgResponseBody) -> Option<&AdgNativeAd> {
    body.native_ad
        .as_ref()
        .filter(|native_ad| !native_ad.assets.is_empty())
}

fn native_image(asset: &AdgNativeAsset) -> Option<NativeImage> {
    asset.img.as_ref().map(|img| NativeImage {
        url: img.url.clone(),
        height: img.h,
        width: img.w,
    })
}

fn data_value(asset: &AdgNativeAsset) -> Option<String> {
    asset.data.as_ref().and_then(|data| data.value.clone())
}

fn create_native_ad(native_ad: &AdgNativeAd, beacon_url: Option<&str>) -> NativeAd {
    let mut native = NativeAd::default();

    for asset in &native_ad.assets {
        match asset.id {
            Some(ASSET_TITLE) => {
                if let Some(title) = asset.title.as_ref() {
                    native.title = title.text.clone();
                }
            }
            Some(ASSET_IMAGE) => {
                if let Some(image) = native_image(asset) {
                    native.image = Some(image);
                }
            }
            Some(ASSET_ICON) => {
                if let Some(icon) = native_image(asset) {
                    native.icon = Some(icon);
                }
            }
            Some(ASSET_SPONSORED_BY) => native.sponsored_by = data_value(asset),
            Some(ASSET_BODY) => native.body = data_value(asset),
            Some(ASSET_CTA) => native.cta = data_value(asset),
            Some(ASSET_PRIVACY_LINK) => {
                native.privacy_link =
                    data_value(asset).map(|link| encode_uri_component(&link));
            }
            other => log::debug!("AdGeneration: ignoring native asset id {:?}", other),
        }
    }

    let link = native_ad.link.as_ref();
    native.click_url = link.and_then(|link| link.url.clone());
    native.click_trackers = link
        .and_then(|link| link.clicktrackers.clone())
        .unwrap_or_default();
    native.impression_trackers = native_ad.imptrackers.clone().unwrap_or_default();
    if let Some(beacon_url) = beacon_url.filter(|url| !url.is_empty()) {
        native.impression_trackers.push(beacon_url.to_string());
    }

    native
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bid_request() -> BidRequest {
        serde_json::from_value(json!({
            "bidder": "adg",
            "params": { "id": "58278" },
            "bidId": "2f6ac468a9c15e",
            "sizes": [[300, 250]]
        }))
        .expect("should deserialize")
    }

    fn native_body() -> Json {
        json!({
            "locationid": "58278",
            "results": [{}],
            "cpm": 36.0009,
            "w": 1,
            "h": 1,
            "creativeid": "1k2kv35vsa5r",
            "dealid": "fd5sa5fa7f",
            "ttl": 1000,
            "beaconurl": "https://tg.socdm.com/bc/v3?b=Y2hzbT0yOTQ",
            "native_ad": {
                "assets": [
                    { "data": { "label": "accompanying_text", "value": "AD" }, "id": 501 },
                    { "data": { "label": "optout_url", "value": "https://supership.jp/optout/#" }, "id": 502 },
                    { "data": { "ext": { "black_back": "https://i.socdm.com/sdk/img/icon.png" }, "label": "information_icon_url", "value": "https://i.socdm.com/sdk/img/icon.png" }, "id": 503 },
                    { "id": 1, "required": 1, "title": { "text": "Title" } },
                    { "id": 2, "img": { "h": 250, "url": "https://sdk-temp.socdm.com/megane.jpg", "w": 300 }, "required": 1 },
                    { "id": 3, "img": { "h": 300, "url": "https://sdk-temp.socdm.com/logo.png", "w": 300 }, "required": 1 },
                    { "data": { "value": "Sponsor" }, "id": 4, "required": 0 },
                    { "data": { "value": "Description" }, "id": 5, "required": 0 },
                    { "data": { "value": "CTA" }, "id": 6, "required": 0 }
                ],
                "imptrackers": ["https://s.socdm.com/adsv/v1?imp=1"],
                "link": {
                    "clicktrackers": ["https://s.socdm.com/adsv/v1?click=1"],
                    "url": "https://supership.jp"
                }
            }
        })
    }

    #[test]
    fn test_no_results_is_no_bid() {
        let request = bid_request();

        let body = decode_body(&json!({ "results": [] })).expect("should decode");
        assert!(interpret_body(&body, &request, "JPY").is_none());

        let body = decode_body(&json!({ "ad": "<div></div>" })).expect("should decode");
        assert!(interpret_body(&body, &request, "JPY").is_none());
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(decode_body(&json!("not a body")).is_err());
        assert!(decode_body(&json!({ "results": "yes" })).is_err());
    }

    #[test]
    fn test_native_bid() {
        let body = decode_body(&native_body()).expect("should decode");
        let bid = interpret_body(&body, &bid_request(), "JPY").expect("should bid");

        assert_eq!(bid.request_id, "2f6ac468a9c15e");
        assert_eq!(bid.cpm, 36.0009);
        assert_eq!(bid.width, 1);
        assert_eq!(bid.height, 1);
        assert_eq!(bid.creative_id, "1k2kv35vsa5r");
        assert_eq!(bid.deal_id, "fd5sa5fa7f");
        assert_eq!(bid.currency, "JPY");
        assert!(bid.net_revenue);
        assert_eq!(bid.ttl, 1000);
        assert_eq!(bid.media_type, Some(MediaType::Native));
        assert!(bid.ad().is_none());

        let native = bid.native().expect("native payload");
        assert_eq!(native.title.as_deref(), Some("Title"));
        assert_eq!(
            native.image,
            Some(NativeImage {
                url: Some("https://sdk-temp.socdm.com/megane.jpg".to_string()),
                height: Some(250),
                width: Some(300),
            })
        );
        assert_eq!(
            native.icon,
            Some(NativeImage {
                url: Some("https://sdk-temp.socdm.com/logo.png".to_string()),
                height: Some(300),
                width: Some(300),
            })
        );
        assert_eq!(native.sponsored_by.as_deref(), Some("Sponsor"));
        assert_eq!(native.body.as_deref(), Some("Description"));
        assert_eq!(native.cta.as_deref(), Some("CTA"));
        assert_eq!(
            native.privacy_link.as_deref(),
            Some("https%3A%2F%2Fsupership.jp%2Foptout%2F%23")
        );
        assert_eq!(native.click_url.as_deref(), Some("https://supership.jp"));
        assert_eq!(
            native.click_trackers,
            vec!["https://s.socdm.com/adsv/v1?click=1".to_string()]
        );
        assert_eq!(
            native.impression_trackers,
            vec![
                "https://s.socdm.com/adsv/v1?imp=1".to_string(),
                "https://tg.socdm.com/bc/v3?b=Y2hzbT0yOTQ".to_string(),
            ]
        );
    }

    #[test]
    fn test_privacy_link_keeps_uri_marks() {
        let body = decode_body(&json!({
            "results": [{}],
            "native_ad": {
                "assets": [{ "id": 502, "data": { "value": "https://supership.jp/optout/(jp)!" } }]
            }
        }))
        .expect("should decode");
        let bid = interpret_body(&body, &bid_request(), "JPY").expect("should bid");

        assert_eq!(
            bid.native().and_then(|native| native.privacy_link.as_deref()),
            Some("https%3A%2F%2Fsupership.jp%2Foptout%2F(jp)!")
        );
    }

    #[test]
    fn test_native_title_only() {
        let body = decode_body(&json!({
            "results": [{}],
            "native_ad": { "assets": [{ "id": 1, "title": { "text": "Hello" } }] }
        }))
        .expect("should decode");
        let bid = interpret_body(&body, &bid_request(), "USD").expect("should bid");

        let native = bid.native().expect("native payload");
        assert_eq!(native.title.as_deref(), Some("Hello"));
        assert_eq!(bid.media_type, Some(MediaType::Native));
        assert!(native.click_url.is_none());
        assert!(native.click_trackers.is_empty());
        assert!(native.impression_trackers.is_empty());
    }

    #[test]
    fn test_native_asset_missing_payload_is_ignored() {
        let body = decode_body(&json!({
            "results": [{}],
            "native_ad": { "assets": [{ "id": 1 }, { "id": 2 }, { "id": 5 }] }
        }))
        .expect("should decode");
        let bid = interpret_body(&body, &bid_request(), "JPY").expect("should bid");

        let native = bid.native().expect("native payload");
        assert!(native.title.is_none());
        assert!(native.image.is_none());
        assert!(native.body.is_none());
    }

    #[test]
    fn test_empty_native_assets_fall_back_to_banner() {
        let body = decode_body(&json!({
            "results": [{}],
            "ad": "<div>banner</div>",
            "native_ad": { "assets": [] }
        }))
        .expect("should decode");
        let bid = interpret_body(&body, &bid_request(), "JPY").expect("should bid");

        assert_eq!(bid.ad(), Some("<div>banner</div>"));
        assert!(bid.media_type.is_none());
    }

    #[test]
    fn test_banner_defaults() {
        let body = decode_body(&json!({
            "results": [{}],
            "ad": "<body><div>ad</div></body>",
            "w": 0,
            "ttl": 0
        }))
        .expect("should decode");
        let bid = interpret_body(&body, &bid_request(), "JPY").expect("should bid");

        assert_eq!(bid.cpm, 0.0);
        assert_eq!(bid.width, 1);
        assert_eq!(bid.height, 1);
        assert_eq!(bid.creative_id, "");
        assert_eq!(bid.deal_id, "");
        assert_eq!(bid.ttl, DEFAULT_BID_TTL_SECS);
        assert!(bid.meta.is_none());
        assert_eq!(bid.ad(), Some("<div>ad</div>"));
    }

    #[test]
    fn test_advertiser_domains() {
        let body = decode_body(&json!({
            "results": [{}],
            "ad": "<div></div>",
            "adomain": ["advertiser.com"]
        }))
        .expect("should decode");
        let bid = interpret_body(&body, &bid_request(), "JPY").expect("should bid");
        assert_eq!(
            bid.meta,
            Some(BidMeta {
                advertiser_domains: vec!["advertiser.com".to_string()],
            })
        );

        for adomain in [json!([]), json!("advertiser.com"), json!(null)] {
            let body = decode_body(&json!({
                "results": [{}],
                "ad": "<div></div>",
                "adomain": adomain
            }))
            .expect("should decode");
            let bid = interpret_body(&body, &bid_request(), "JPY").expect("should bid");
            assert!(bid.meta.is_none());
        }
    }

    #[test]
    fn test_numeric_creative_id_is_stringified() {
        let body = decode_body(&json!({
            "results": [{}],
            "ad": "<div></div>",
            "creativeid": 12345
        }))
        .expect("should decode");
        let bid = interpret_body(&body, &bid_request(), "JPY").expect("should bid");
        assert_eq!(bid.creative_id, "12345");
    }
}
