//! Shared building blocks for the user directory workspace.
//! - `types`: response payloads shared by the HTTP layer
//! - `utils::logging`: tracing subscriber bootstrap
//! - `metrics`: Prometheus counters and text exposition

pub mod metrics;
pub mod types;
pub mod utils;
