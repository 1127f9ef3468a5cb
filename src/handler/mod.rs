//! Request handler module
//!
//! Route table, dispatch, and the per-endpoint handlers for the country
//! dataset and the static assets.

mod assets;
mod countries;
mod dispatch;
mod mutations;
pub mod routes;

// Re-export the dispatch entry point and startup-time pieces
pub use assets::StaticAssets;
pub use dispatch::{handle_request, RequestContext};
pub use routes::RouteTable;
