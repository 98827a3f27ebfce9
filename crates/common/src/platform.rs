//! Runtime platform detection.

use once_cell::sync::Lazy;
use regex::Regex;

static IOS_USER_AGENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(ios|ipod|ipad|iphone)").expect("valid iOS user agent regex"));

/// Answers questions about the device the auction runs for.
pub trait PlatformDetector: Send + Sync {
    /// True when the runtime is an iOS device.
    fn is_ios(&self) -> bool;
}

/// Detects the platform from a browser user agent string.
#[derive(Debug, Clone, Default)]
pub struct UserAgentPlatform {
    user_agent: Option<String>,
}

impl UserAgentPlatform {
    #[must_use]
    pub fn new(user_agent: Option<String>) -> Self {
        Self { user_agent }
    }
}

impl PlatformDetector for UserAgentPlatform {
    fn is_ios(&self) -> bool {
        self.user_agent
            .as_deref()
            .is_some_and(|ua| IOS_USER_AGENT.is_match(ua))
    }
}
