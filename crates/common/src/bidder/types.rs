//! Core types exchanged between the host auction framework and bidder adapters.

use error_stack::{Report, ResultExt};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use std::fmt;
use url::Url;

use crate::error::AdapterError;

/// Media type enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Banner,
    Video,
    Native,
}

/// A single slot the host wants a bid for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    /// Bidder code the request was routed to
    #[serde(default)]
    pub bidder: String,
    /// Bidder-specific parameters from the ad unit
    #[serde(default)]
    pub params: BidParams,
    /// Requested creative sizes, normally `[width, height]` pairs
    ///
    /// Entries are kept raw so a malformed list only drops the sizes
    /// parameter instead of the whole request.
    #[serde(default, deserialize_with = "deserialize_lenient_list")]
    pub sizes: Vec<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_types: Option<MediaTypes>,
    /// Third-party identities resolved by the host's id modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserIds>,
    #[serde(default)]
    pub bid_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_unit_code: Option<String>,
}

impl BidRequest {
    /// True when the ad unit declares a native media type.
    #[must_use]
    pub fn has_native(&self) -> bool {
        self.media_types
            .as_ref()
            .is_some_and(|media_types| media_types.native.is_some())
    }
}

/// Bidder parameters (`params`) of a bid request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidParams {
    /// Ad placement id (accepts both string and integer)
    #[serde(
        default,
        deserialize_with = "deserialize_truthy_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Route the request to the test endpoint (any truthy value)
    #[serde(default, deserialize_with = "deserialize_truthy_bool")]
    pub debug: bool,

    /// Top margin for upper billboard video creatives
    #[serde(
        default,
        rename = "marginTop",
        deserialize_with = "deserialize_truthy_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub margin_top: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaTypes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<NativeMediaType>,
}

/// Native media type definition.
///
/// Holds either the legacy key layout (`title`, `image`, `sponsoredBy`, ...)
/// in `legacy`, an OpenRTB native request in `ortb`, or both once converted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeMediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ortb: Option<NativeOrtbRequest>,
    #[serde(flatten)]
    pub legacy: Map<String, Json>,
}

/// OpenRTB native 1.2 request subset used for legacy conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeOrtbRequest {
    #[serde(default)]
    pub assets: Vec<NativeOrtbAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<u8>,
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeOrtbAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<NativeOrtbTitle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<NativeOrtbImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NativeOrtbData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeOrtbTitle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeOrtbImage {
    /// 1 = icon, 3 = main image
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub image_type: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wmin: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmin: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeOrtbData {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<u32>,
}

/// Identities resolved by the host's user id modules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserIds {
    #[serde(
        default,
        rename = "criteoId",
        deserialize_with = "deserialize_truthy_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub criteo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id5id: Option<Id5Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub novatiq: Option<NovatiqId>,
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Id5Id {
    #[serde(
        default,
        deserialize_with = "deserialize_truthy_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Id5Ext>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Id5Ext {
    #[serde(
        default,
        rename = "linkType",
        deserialize_with = "deserialize_truthy_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NovatiqId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snowflake: Option<NovatiqSnowflake>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NovatiqSnowflake {
    #[serde(
        default,
        deserialize_with = "deserialize_truthy_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Kept raw: only the number `1` marks a completed sync
    #[serde(
        default,
        rename = "syncResponse",
        skip_serializing_if = "Option::is_none"
    )]
    pub sync_response: Option<Json>,
}

/// Context shared by every bid request in a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidderRequest {
    #[serde(default)]
    pub referer_info: RefererInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidder_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auction_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefererInfo {
    /// Canonical page URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    #[serde(rename = "GET")]
    Get,
}

/// Description of an HTTP call for the host to perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Query string without the leading `?`
    pub data: String,
    /// The bid request this call was built from
    pub bid_request: BidRequest,
}

impl ServerRequest {
    /// Full request URL with `data` as the query string.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidRequest`] if `url` is not absolute.
    pub fn full_url(&self) -> Result<Url, Report<AdapterError>> {
        let mut url = Url::parse(&self.url).change_context(AdapterError::InvalidRequest {
            message: format!("Invalid endpoint URL: {}", self.url),
        })?;
        if !self.data.is_empty() {
            url.set_query(Some(&self.data));
        }
        Ok(url)
    }
}

/// Completed HTTP response handed back by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerResponse {
    #[serde(default)]
    pub body: Json,
}

/// Normalized bid returned to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    /// `bidId` of the originating request
    pub request_id: String,
    pub cpm: f64,
    pub width: u32,
    pub height: u32,
    pub creative_id: String,
    pub deal_id: String,
    pub currency: String,
    pub net_revenue: bool,
    /// Seconds the bid stays valid
    pub ttl: u32,
    #[serde(flatten)]
    pub creative: Creative,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<BidMeta>,
}

impl Bid {
    /// Banner markup, if this is a banner bid.
    #[must_use]
    pub fn ad(&self) -> Option<&str> {
        match &self.creative {
            Creative::Banner(markup) => Some(markup),
            Creative::Native(_) => None,
        }
    }

    /// Native payload, if this is a native bid.
    #[must_use]
    pub fn native(&self) -> Option<&NativeAd> {
        match &self.creative {
            Creative::Native(native) => Some(native),
            Creative::Banner(_) => None,
        }
    }
}

/// Creative payload: serialized as either `ad` or `native`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Creative {
    #[serde(rename = "ad")]
    Banner(String),
    #[serde(rename = "native")]
    Native(NativeAd),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAd {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<NativeImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<NativeImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsored_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_url: Option<String>,
    pub click_trackers: Vec<String>,
    pub impression_trackers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NativeImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidMeta {
    pub advertiser_domains: Vec<String>,
}

/// Which user sync kinds the host allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOptions {
    #[serde(default)]
    pub iframe_enabled: bool,
    #[serde(default)]
    pub pixel_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserSyncType {
    Image,
    Iframe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSync {
    #[serde(rename = "type")]
    pub sync_type: UserSyncType,
    pub url: String,
}

/// Deserialize a loosely typed scalar into `Option<String>`.
///
/// Strings are kept as-is, numbers and `true` are rendered as strings, and
/// falsy non-string values (`0`, `false`, `null`) become `None`.
pub(crate) fn deserialize_truthy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TruthyStringVisitor;

    impl<'de> Visitor<'de> for TruthyStringVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok((value != 0).then(|| value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok((value != 0).then(|| value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok((value != 0.0 && !value.is_nan()).then(|| value.to_string()))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.then(|| "true".to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(TruthyStringVisitor)
        }
    }

    deserializer.deserialize_any(TruthyStringVisitor)
}

/// Deserialize any JSON value as a boolean by its truthiness.
///
/// `false`, `0`, `""` and `null` are false; every other value is true.
fn deserialize_truthy_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Json::deserialize(deserializer)?;
    Ok(match value {
        Json::Null => false,
        Json::Bool(flag) => flag,
        Json::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Json::String(text) => !text.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    })
}

/// Deserialize a JSON array into its raw entries; any other value is empty.
fn deserialize_lenient_list<'de, D>(deserializer: D) -> Result<Vec<Json>, D::Error>
where
    D: Deserializer<'de>,
{
    match Json::deserialize(deserializer)? {
        Json::Array(entries) => Ok(entries),
        _ => Ok(Vec::new()),
    }
}
