//! HTTP protocol layer module
//!
//! Body and query decoding plus response building, decoupled from the
//! country-specific handlers.

pub mod body;
pub mod query;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_413_response, build_asset_response, error_response, json_response,
    no_content,
};
