use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{
    ADGENERATION_DEBUG_ENDPOINT, ADGENERATION_ENDPOINT, PREBID_VERSION_PLACEHOLDER,
};
use crate::error::AdapterError;

/// Environment variable prefix for settings overrides,
/// e.g. `ADGENERATION__CURRENCY__AD_SERVER_CURRENCY=USD`.
pub const ENVIRONMENT_VARIABLE_PREFIX: &str = "ADGENERATION";
pub const ENVIRONMENT_VARIABLE_SEPARATOR: &str = "__";

/// Configuration for the AdGeneration adapter.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AdGenerationSettings {
    /// Whether the adapter is registered at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Production ad server endpoint
    #[serde(default = "default_endpoint")]
    #[validate(url)]
    pub endpoint: String,

    /// Endpoint used when a bid request sets `params.debug`
    #[serde(default = "default_debug_endpoint")]
    #[validate(url)]
    pub debug_endpoint: String,

    /// Version of the host library, reported as `pbver`
    #[serde(default = "default_prebid_version")]
    #[validate(length(min = 1))]
    pub prebid_version: String,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    ADGENERATION_ENDPOINT.to_string()
}

fn default_debug_endpoint() -> String {
    ADGENERATION_DEBUG_ENDPOINT.to_string()
}

fn default_prebid_version() -> String {
    PREBID_VERSION_PLACEHOLDER.to_string()
}

impl Default for AdGenerationSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            debug_endpoint: default_debug_endpoint(),
            prebid_version: default_prebid_version(),
        }
    }
}

/// Host currency configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CurrencySettings {
    #[serde(default)]
    pub ad_server_currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub adgeneration: AdGenerationSettings,
    #[serde(default)]
    pub currency: CurrencySettings,
}

impl Settings {
    /// Parse settings from TOML, apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] when the TOML is malformed,
    /// a field has the wrong type, or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<AdapterError>> {
        let environment = Environment::default()
            .prefix(ENVIRONMENT_VARIABLE_PREFIX)
            .separator(ENVIRONMENT_VARIABLE_SEPARATOR);

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(AdapterError::Configuration {
                message: "Failed to build configuration".to_string(),
            })?;

        let settings: Self =
            config
                .try_deserialize()
                .change_context(AdapterError::Configuration {
                    message: "Failed to deserialize configuration".to_string(),
                })?;

        settings
            .validate()
            .change_context(AdapterError::Configuration {
                message: "Settings validation failed".to_string(),
            })?;

        Ok(settings)
    }
}
