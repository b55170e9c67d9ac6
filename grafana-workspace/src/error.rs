//! Error types for the `grafana-workspace` tool
//!
//! Aggregates configuration and workspace failures into a single
//! top-level error and maps each to a process exit code.

use thiserror::Error;

pub use grafana_workspace_core::error::{
    ConfigError, Rule, ValidationError, ValidationErrors, ValidationWarning,
};

use crate::resource::StackError;
use crate::workspace::WorkspaceError;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `grafana-workspace` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `grafana-workspace` operations.
#[derive(Debug, Error)]
pub enum GrafanaWorkspaceError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Workspace construction error
    #[error(transparent)]
    Workspace(#[from] WorkspaceError<StackError>),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GrafanaWorkspaceError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::MissingFile { .. }) => ExitCode::IO_ERROR,
            Self::Config(_) | Self::Workspace(WorkspaceError::Validation(_)) => {
                ExitCode::CONFIG_ERROR
            }
            Self::Workspace(WorkspaceError::Synthesis(_)) | Self::Json(_) => ExitCode::ERROR,
        }
    }
}
