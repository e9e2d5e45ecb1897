//! Logging and metric helpers shared by the relay crates.
//!
//! Counters go through the `metrics` facade; without an installed recorder
//! they are free no-ops, which keeps tests quiet.

mod config;
mod context;
mod counters;
mod spans;
mod tracing_init;

pub use config::TelemetryConfig;
pub use context::TelemetryLabels;
pub use counters::{record_counter, with_common_fields};
pub use spans::{start_ingress_span, start_push_span, start_reply_span};
pub use tracing_init::init_telemetry;
