//! `grafana-workspace` - managed Grafana workspace resource mapping
//!
//! Validates workspace configurations and registers them as
//! `AWS::Grafana::Workspace` resources with a synthesis engine, deriving
//! the workspace's ARN and name from the handle the engine returns.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod resource;
pub mod workspace;

pub use workspace::{Workspace, WorkspaceError};
