//! Configuration loading and validation commands.
//!
//! Configuration is loaded from TOML files and merged with environment variables
//! prefixed with `ADGENERATION__`. For example, `ADGENERATION__CURRENCY__AD_SERVER_CURRENCY`
//! will override `currency.ad_server_currency` in the TOML file.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use adgeneration_common::settings::Settings;

use crate::error::CliError;

/// Load settings from `file`, or defaults plus environment overrides when no
/// file is given.
pub(crate) fn load_settings(file: Option<&Path>, verbose: bool) -> Result<Settings, CliError> {
    let content = match file {
        Some(path) => {
            if verbose {
                log::info!("Loading config from: {}", path.display());
            }
            fs::read_to_string(path)?
        }
        None => String::new(),
    };

    Settings::from_toml(&content)
        .map_err(|e| CliError::Config(format!("Failed to parse and merge config: {:?}", e)))
}

/// Validate configuration file and return a short report.
pub fn validate(file: PathBuf, verbose: bool) -> Result<String, CliError> {
    let settings = load_settings(Some(&file), verbose)?;
    let adgeneration = &settings.adgeneration;

    let mut report = String::from("Configuration is valid\n");
    let _ = writeln!(report, "  File: {}", file.display());
    let _ = writeln!(report, "  Adapter enabled: {}", adgeneration.enabled);
    let _ = writeln!(report, "  Endpoint: {}", adgeneration.endpoint);
    let _ = write!(report, "  Debug endpoint: {}", adgeneration.debug_endpoint);
    if verbose {
        let _ = write!(
            report,
            "\n  Prebid version: {}\n  Ad server currency: {}",
            adgeneration.prebid_version,
            settings
                .currency
                .ad_server_currency
                .as_deref()
                .unwrap_or("(unset)")
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_config(dir: &TempDir) -> PathBuf {
        let config_path = dir.path().join("test-config.toml");
        let mut file = fs::File::create(&config_path).unwrap();
        write!(
            file,
            r#"
[adgeneration]
enabled = true
endpoint = "https://d.socdm.com/adsv/v1"
prebid_version = "9.0.0"

[currency]
ad_server_currency = "USD"
"#
        )
        .unwrap();
        config_path
    }

    #[test]
    fn test_validate_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = create_test_config(&dir);

        let report = validate(config_path, true).unwrap();
        assert!(report.starts_with("Configuration is valid"));
        assert!(report.contains("Ad server currency: USD"));
    }

    #[test]
    fn test_validate_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("invalid.toml");
        fs::write(&config_path, "invalid { toml").unwrap();

        let result = validate(config_path, false);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_validate_invalid_endpoint() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad-endpoint.toml");
        fs::write(&config_path, "[adgeneration]\nendpoint = \"not a url\"\n").unwrap();

        let result = validate(config_path, false);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_validate_nonexistent_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let result = validate(config_path, false);
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_load_settings_without_file_uses_defaults() {
        let settings = load_settings(None, false).unwrap();
        assert!(settings.adgeneration.enabled);
        assert_eq!(settings.adgeneration.endpoint, "https://d.socdm.com/adsv/v1");
    }

    #[test]
    fn test_load_settings_reads_file() {
        let dir = TempDir::new().unwrap();
        let config_path = create_test_config(&dir);

        let settings = load_settings(Some(&config_path), false).unwrap();
        assert_eq!(settings.adgeneration.prebid_version, "9.0.0");
        assert_eq!(settings.currency.ad_server_currency.as_deref(), Some("USD"));
    }
}
