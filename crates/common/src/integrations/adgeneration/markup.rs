//! Banner markup assembly.
//!
//! The ad server returns either ready-made banner HTML (`ad`) or a VAST
//! document (`vastxml`). VAST responses are wrapped in a loader document for
//! the APV player, or for ADGBrowserM when the placement is an upper
//! billboard. The tracking beacon is inserted before the closing `</body>`
//! and the `<body>` wrapper is stripped before the markup is handed back.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde_json::json;

use crate::bidder::types::BidRequest;
use crate::constants::{ADG_BROWSER_M_SCRIPT_URL, APV_SCRIPT_URL};
use crate::http_util::escape_unsafe_chars;

use super::response::AdgResponseBody;

const UPPER_BILLBOARD_AD_TYPE: &str = "upper_billboard";
const BODY_OPEN: &str = "<body>";
const BODY_CLOSE: &str = "</body>";

static BODY_CLOSE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</\s?body>").expect("valid closing body regex"));

/// Build the banner markup for `body`, correlated to `request`.
pub(super) fn create_ad(body: &AdgResponseBody, request: &BidRequest) -> String {
    let mut ad = body.ad.clone().unwrap_or_default();

    if let Some(vast_xml) = body.vastxml.as_deref().filter(|vast| !vast.is_empty()) {
        ad = if is_upper_billboard(body) {
            let margin_top = request
                .params
                .margin_top
                .as_deref()
                .filter(|margin| !margin.is_empty())
                .unwrap_or("0");
            log::debug!("Wrapping VAST for upper billboard (marginTop: {})", margin_top);
            format!(
                "<body>{}{}</body>",
                adg_browser_m_tag(),
                insert_vast_method_for_adg_browser_m(vast_xml, margin_top)
            )
        } else {
            format!(
                "<body><div id=\"apvad-{}\"></div>{}{}</body>",
                request.bid_id,
                apv_tag(),
                insert_vast_method_for_apv(&request.bid_id, vast_xml)
            )
        };
    }

    let ad = match body.beacon.as_deref() {
        Some(beacon) => append_child_to_body(&ad, beacon),
        None => ad,
    };
    match remove_wrapper(&ad) {
        Some(inner) if !inner.is_empty() => inner,
        _ => ad,
    }
}

fn is_upper_billboard(body: &AdgResponseBody) -> bool {
    body.location_params
        .as_ref()
        .and_then(|params| params.option.as_ref())
        .and_then(|option| option.ad_type.as_deref())
        == Some(UPPER_BILLBOARD_AD_TYPE)
}

fn apv_tag() -> String {
    format!("<script type=\"text/javascript\" id=\"apv\" src=\"{APV_SCRIPT_URL}\"></script>")
}

fn adg_browser_m_tag() -> String {
    format!("<script type=\"text/javascript\" src=\"{ADG_BROWSER_M_SCRIPT_URL}\"></script>")
}

fn strip_newlines(vast_xml: &str) -> String {
    vast_xml.replace("\r\n", "").replace('\n', "")
}

fn insert_vast_method_for_apv(target_id: &str, vast_xml: &str) -> String {
    let apv_video_ad_param = json!({ "s": target_id });
    format!(
        "<script type=\"text/javascript\">(function(){{ new APV.VideoAd({}).load('{}'); }})();</script>",
        escape_unsafe_chars(&apv_video_ad_param.to_string()),
        strip_newlines(vast_xml)
    )
}

fn insert_vast_method_for_adg_browser_m(vast_xml: &str, margin_top: &str) -> String {
    format!(
        "<script type=\"text/javascript\">window.ADGBrowserM.init({{vastXml: '{}', marginTop: '{}'}});</script>",
        strip_newlines(vast_xml),
        margin_top
    )
}

/// Insert `child` before the first closing body tag.
fn append_child_to_body(ad: &str, child: &str) -> String {
    let replacement = format!("{child}{BODY_CLOSE}");
    BODY_CLOSE_PATTERN
        .replacen(ad, 1, NoExpand(&replacement))
        .into_owned()
}

/// Strip the `<body>` wrapper.
///
/// The kept window starts at `<body>` and spans as many bytes as the offset
/// of the last `</body>`, so for markup that opens with `<body>` it ends
/// right before the closing tag. Returns `None` without a wrapper pair.
fn remove_wrapper(ad: &str) -> Option<String> {
    let body_index = ad.find(BODY_OPEN)?;
    let last_body_index = ad.rfind(BODY_CLOSE)?;

    let mut end = body_index.saturating_add(last_body_index).min(ad.len());
    while !ad.is_char_boundary(end) {
        end += 1;
    }

    Some(
        ad[body_index..end]
            .replacen(BODY_OPEN, "", 1)
            .replacen(BODY_CLOSE, "", 1),
    )
}
