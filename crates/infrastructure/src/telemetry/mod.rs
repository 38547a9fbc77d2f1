//! Tracing subscriber setup
//!
//! Console logging in text or JSON format, filtered by `RUST_LOG` or the
//! configured filter.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
