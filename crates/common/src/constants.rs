/// Bidder code the adapter registers under.
pub const ADGENERATION_BIDDER_CODE: &str = "adgeneration";
/// Short alias accepted by the registry.
pub const ADGENERATION_ALIASES: &[&str] = &["adg"];

/// Production ad server endpoint.
pub const ADGENERATION_ENDPOINT: &str = "https://d.socdm.com/adsv/v1";
/// Test ad server endpoint, selected by `params.debug`.
pub const ADGENERATION_DEBUG_ENDPOINT: &str = "https://api-test.scaleout.jp/adsv/v1";

/// Adapter protocol version reported as `adapterver`.
pub const ADGENERATION_ADAPTER_VERSION: &str = "1.5.0";
/// Host library version placeholder reported as `pbver` unless configured.
pub const PREBID_VERSION_PLACEHOLDER: &str = "$prebid.version$";
/// SDK name reported as `sdkname`.
pub const SDK_NAME: &str = "prebidjs";

/// APV video player loader.
pub const APV_SCRIPT_URL: &str = "https://cdn.apvdr.com/js/VideoAd.min.js";
/// ADGBrowserM upper billboard loader.
pub const ADG_BROWSER_M_SCRIPT_URL: &str = "https://i.socdm.com/sdk/js/adg-browser-m.js";

/// Host configuration key holding the ad server currency.
pub const AD_SERVER_CURRENCY_KEY: &str = "currency.adServerCurrency";

/// Bid time-to-live in seconds when the ad server omits one.
pub const DEFAULT_BID_TTL_SECS: u32 = 10;
