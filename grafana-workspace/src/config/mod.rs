//! Configuration loading
//!
//! Re-exports the configuration schema and validator from
//! `grafana-workspace-core` alongside the file loader.

pub mod loader;

pub use grafana_workspace_core::config::*;
pub use loader::{ConfigLoader, LoadResult, LoadWarning, LoaderOptions};
