//! Error types for the bidder adapter.
//!
//! Host-facing adapter operations never fail; they degrade to "no bid" or a
//! partial query string. These errors cover the plumbing around them:
//! settings loading, response decoding and descriptor URL assembly.

use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum AdapterError {
    /// Settings could not be loaded or failed validation.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// The ad server body could not be decoded into the vendor format.
    #[display("Invalid bid response: {message}")]
    InvalidResponse { message: String },

    /// A request descriptor or input document is malformed.
    #[display("Invalid request: {message}")]
    InvalidRequest { message: String },
}
