//! Vendor adapters.
//!
//! Each submodule exposes a `register_adapters` builder that the bidder
//! registry calls with the loaded settings.

pub mod adgeneration;
