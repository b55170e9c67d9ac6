//! Core error types for Grafana workspace configuration
//!
//! Validation and configuration-loading error types shared across the
//! workspace.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading errors.
///
/// These cover every failure mode between reading a configuration file
/// and handing a typed `WorkspaceConfiguration` to the resource mapper.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing or typed deserialization failed
    #[error("parse error in {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}: {errors}")]
    Validation {
        /// Path to the configuration file
        path: PathBuf,
        /// Every rule violation found in the file
        errors: ValidationErrors,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Configuration contains a key the workspace model does not know
    #[error("unknown field '{field}'{}", suggestion.as_ref().map_or_else(String::new, |s| format!(", did you mean '{s}'?")))]
    UnknownField {
        /// The unrecognized key
        field: String,
        /// Closest known key, if one is near enough
        suggestion: Option<String>,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Environment variable referenced in configuration is not set
    #[error("environment variable '{var}' not set (referenced at {location})")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Location in the configuration where it was referenced
        location: String,
    },

    /// One or more configuration files failed validation.
    #[error("{count} file(s) failed validation")]
    ValidationFailed {
        /// Number of files that failed validation.
        count: usize,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// The rule a configuration value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// A required field was empty
    Required,
    /// `clientToken` must be 1-64 printable ASCII characters
    ClientTokenFormat,
    /// `dataSources` may only be used with a service-managed permission type
    DataSourcesRequireServiceManaged,
    /// `description` must not exceed 2048 characters
    DescriptionLength,
    /// `name` must be 1-255 characters of `[A-Za-z0-9-._~]`
    NameFormat,
}

impl Rule {
    /// Human-readable statement of the rule.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Required => "is required and cannot be empty",
            Self::ClientTokenFormat => "must match the pattern ^[!-~]{1,64}$",
            Self::DataSourcesRequireServiceManaged => {
                "can only be used with permissionType SERVICE_MANAGED"
            }
            Self::DescriptionLength => "length must be less than or equal to 2048",
            Self::NameFormat => "must match the pattern ^[a-zA-Z0-9-._~]{1,255}$",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single rule violation.
///
/// `value` carries the offending value, or a summary of it where the
/// value itself is not useful (the length check reports the length).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field} {rule}, got {value}")]
pub struct ValidationError {
    /// Configuration field the rule applies to (e.g. "clientToken")
    pub field: String,
    /// Offending value or a summary of it
    pub value: String,
    /// The violated rule
    pub rule: Rule,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, value: impl Into<String>, rule: Rule) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            rule,
        }
    }
}

/// A non-empty set of rule violations collected from one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps collected errors, returning `None` when there are none.
    #[must_use]
    pub fn new(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the violations in the order they were found.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Returns `true` if any violation concerns `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Consumes the set, returning the underlying violations.
    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A potential problem that does not prevent the configuration from
/// being used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    /// Path to the field (e.g., "samlConfiguration.idpMetadata")
    pub field: String,
    /// Description of the problem
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning: {} at {}", self.message, self.field)
    }
}
