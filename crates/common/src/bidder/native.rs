//! Conversion of OpenRTB native requests into the legacy native key layout.
//!
//! Adapters that predate OpenRTB native requests read `mediaTypes.native` as
//! a map of named assets (`title`, `image`, `sponsoredBy`, ...). When the ad
//! unit is configured with `mediaTypes.native.ortb` instead, the legacy keys
//! are derived from the ORTB assets. The `ortb` object itself is kept.

use serde_json::{json, Map, Value as Json};

use super::types::{BidRequest, NativeOrtbAsset, NativeOrtbRequest};

/// ORTB image asset type for the main image; every other type maps to the icon.
const IMAGE_TYPE_MAIN: u8 = 3;

/// Legacy key for an ORTB native data asset type.
fn legacy_data_key(data_type: u8) -> Option<&'static str> {
    let key = match data_type {
        1 => "sponsoredBy",
        2 => "body",
        3 => "rating",
        4 => "likes",
        5 => "downloads",
        6 => "price",
        7 => "salePrice",
        8 => "phone",
        9 => "address",
        10 => "body2",
        11 => "displayUrl",
        12 => "cta",
        _ => return None,
    };
    Some(key)
}

/// Convert the ORTB native definition of every request that carries one.
///
/// Requests without `mediaTypes.native.ortb` are returned unchanged.
#[must_use]
pub fn convert_ortb_request_to_proprietary_native(requests: &[BidRequest]) -> Vec<BidRequest> {
    requests
        .iter()
        .map(|request| {
            let mut request = request.clone();
            if let Some(native) = request
                .media_types
                .as_mut()
                .and_then(|media_types| media_types.native.as_mut())
            {
                if let Some(ortb) = native.ortb.as_ref() {
                    let legacy = to_legacy_request(ortb);
                    log::debug!(
                        "Converted ORTB native request for bid '{}' into {} legacy assets",
                        request.bid_id,
                        legacy.len()
                    );
                    native.legacy.extend(legacy);
                }
            }
            request
        })
        .collect()
}

/// Build the legacy key map for one ORTB native request.
#[must_use]
pub fn to_legacy_request(ortb: &NativeOrtbRequest) -> Map<String, Json> {
    let mut legacy = Map::new();

    for asset in &ortb.assets {
        if let Some((key, value)) = legacy_asset(asset) {
            legacy.insert(key.to_string(), value);
        }
    }

    if ortb.privacy.is_some_and(|privacy| privacy != 0) {
        legacy.insert("privacyLink".to_string(), json!({ "required": false }));
    }

    legacy
}

fn legacy_asset(asset: &NativeOrtbAsset) -> Option<(&'static str, Json)> {
    let required = asset.required == Some(1);

    if let Some(title) = &asset.title {
        let mut value = json!({ "required": required });
        if let Some(len) = title.len {
            value["len"] = json!(len);
        }
        return Some(("title", value));
    }

    if let Some(img) = &asset.img {
        let mut value = json!({ "required": required });
        if let (Some(w), Some(h)) = (img.w, img.h) {
            value["sizes"] = json!([w, h]);
        } else if let (Some(wmin), Some(hmin)) = (img.wmin, img.hmin) {
            value["aspect_ratios"] = json!([{
                "min_width": wmin,
                "min_height": hmin,
                "ratio_width": wmin,
                "ratio_height": hmin,
            }]);
        }
        let key = if img.image_type == Some(IMAGE_TYPE_MAIN) {
            "image"
        } else {
            "icon"
        };
        return Some((key, value));
    }

    if let Some(data) = &asset.data {
        let key = data.data_type.and_then(legacy_data_key)?;
        let mut value = json!({ "required": required });
        if let Some(len) = data.len {
            value["len"] = json!(len);
        }
        return Some((key, value));
    }

    None
}
