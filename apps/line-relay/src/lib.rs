//! HTTP surface of the LINE webhook relay.
//!
//! One `POST` route per message kind feeds the core pipeline; `/send`
//! forwards push requests; `/` answers liveness probes.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod respond;

pub use client::LineClient;
pub use config::{ConfigError, RelayConfig};
pub use error::ApiError;
pub use http::{AppState, route_path, router};
