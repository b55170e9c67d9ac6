//! Observability module
//!
//! Logging and metrics for workspace validation and resource mapping.

pub mod logging;
pub mod metrics;

pub use logging::{LogFormat, init_logging};
pub use metrics::describe_metrics;
