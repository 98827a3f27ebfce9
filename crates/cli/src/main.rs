//! AdGeneration adapter CLI.
//!
//! This tool provides commands for:
//! - Building ad server request descriptors from bid request documents
//! - Interpreting saved ad server responses into bids
//! - Validating configuration files

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use adgeneration_common::constants::ADGENERATION_BIDDER_CODE;
use adgeneration_common::logging::init_logging;

mod bids;
mod config;
mod error;

use bids::HostOptions;
use error::CliError;

#[derive(Parser)]
#[command(name = "adgcli")]
#[command(about = "Offline driver for the AdGeneration bidder adapter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Args)]
struct HostArgs {
    /// Path to the TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Bidder code or alias to resolve
    #[arg(long, default_value = ADGENERATION_BIDDER_CODE)]
    bidder: String,

    /// User agent of the simulated browser
    #[arg(long, env = "ADGCLI_USER_AGENT")]
    user_agent: Option<String>,

    /// Ad server currency, overriding the configuration
    #[arg(long)]
    currency: Option<String>,
}

impl HostArgs {
    fn options(&self) -> HostOptions {
        HostOptions {
            bidder: self.bidder.clone(),
            user_agent: self.user_agent.clone(),
            currency: self.currency.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build ad server request descriptors for a list of bid requests
    Build {
        /// JSON file holding an array of bid requests
        #[arg(long, short)]
        requests: PathBuf,

        /// JSON file holding the batch context (referer info)
        #[arg(long)]
        bidder_request: Option<PathBuf>,

        #[command(flatten)]
        host: HostArgs,
    },

    /// Interpret an ad server response into bids
    Interpret {
        /// JSON file holding a request descriptor produced by `build`
        #[arg(long)]
        request: PathBuf,

        /// JSON file holding the ad server response body
        #[arg(long)]
        response: PathBuf,

        #[command(flatten)]
        host: HostArgs,
    },

    /// Validate config against settings validation
    Validate {
        /// Path to the TOML configuration file
        #[arg(long, short)]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = init_logging(level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Execute a command and return what it prints on stdout.
///
/// Diagnostics go through the logger (stderr), so `build` and `interpret`
/// output stays parseable JSON.
fn run(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Commands::Build {
            requests,
            bidder_request,
            host,
        } => {
            let settings = config::load_settings(host.config.as_deref(), cli.verbose)?;
            let descriptors = bids::build(
                &settings,
                &host.options(),
                &requests,
                bidder_request.as_deref(),
            )?;
            Ok(serde_json::to_string_pretty(&descriptors)?)
        }
        Commands::Interpret {
            request,
            response,
            host,
        } => {
            let settings = config::load_settings(host.config.as_deref(), cli.verbose)?;
            let bids = bids::interpret(&settings, &host.options(), &request, &response)?;
            Ok(serde_json::to_string_pretty(&bids)?)
        }
        Commands::Validate { file } => config::validate(file, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_command() {
        let cli = Cli::parse_from([
            "adgcli",
            "build",
            "--requests",
            "requests.json",
            "--currency",
            "USD",
            "--verbose",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Build {
                requests,
                bidder_request,
                host,
            } => {
                assert_eq!(requests, PathBuf::from("requests.json"));
                assert!(bidder_request.is_none());
                assert_eq!(host.bidder, "adgeneration");
                assert_eq!(host.currency.as_deref(), Some("USD"));
            }
            _ => panic!("Expected build command"),
        }
    }

    #[test]
    fn test_parse_interpret_command() {
        let cli = Cli::parse_from([
            "adgcli",
            "interpret",
            "--request",
            "descriptor.json",
            "--response",
            "response.json",
            "--bidder",
            "adg",
        ]);

        match cli.command {
            Commands::Interpret { host, .. } => assert_eq!(host.bidder, "adg"),
            _ => panic!("Expected interpret command"),
        }
    }

    #[test]
    fn test_verbose_build_output_is_json() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, "[adgeneration]\nprebid_version = \"9.0.0\"\n").unwrap();
        let requests = dir.path().join("requests.json");
        fs::write(
            &requests,
            r#"[{ "params": { "id": "58278" }, "sizes": [[300, 250]], "bidId": "b1" }]"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "adgcli",
            "build",
            "--requests",
            requests.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--verbose",
        ]);

        let output = run(cli).unwrap();
        let descriptors: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(descriptors[0]["bidRequest"]["bidId"], "b1");
        assert!(descriptors[0]["data"]
            .as_str()
            .unwrap()
            .contains("&pbver=9.0.0&"));
    }
}
