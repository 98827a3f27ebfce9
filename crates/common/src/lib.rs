//! AdGeneration bidder adapter.
//!
//! This crate turns header-bidding bid requests into AdGeneration ad server
//! calls and the ad server's responses back into normalized bids. Adapters
//! are pure transforms: the host performs the HTTP exchange.
//!
//! # Modules
//!
//! - [`bidder`]: Adapter trait, shared request/response types and registry
//! - [`config_store`]: Host configuration lookups
//! - [`constants`]: Endpoints, versions and protocol constants
//! - [`error`]: Error types and error handling utilities
//! - [`http_util`]: Query string and inline script helpers
//! - [`integrations`]: Vendor adapter implementations
//! - [`logging`]: Logger initialization
//! - [`platform`]: Device platform detection
//! - [`settings`]: Configuration management and validation

pub mod bidder;
pub mod config_store;
pub mod constants;
pub mod error;
pub mod http_util;
pub mod integrations;
pub mod logging;
pub mod platform;
pub mod settings;
