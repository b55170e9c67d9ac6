//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. Size check and UTF-8 BOM strip
//! 2. Environment variable expansion (pre-parse, on raw text)
//! 3. YAML parsing (JSON is accepted as a YAML subset)
//! 4. Unknown top-level key detection with suggestions
//! 5. Deserialization to `WorkspaceConfiguration`
//! 6. Validation

use std::path::{Path, PathBuf};

use grafana_workspace_core::config::{Validator, WorkspaceConfiguration};
use grafana_workspace_core::error::{ConfigError, ValidationErrors};
use serde::Serialize;
use serde_yaml::Value;

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,

    /// Skip the validation stage (used by callers that validate themselves).
    pub skip_validation: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_config_size: env_or("GRAFANA_WORKSPACE_MAX_CONFIG_SIZE", 1024 * 1024),
            skip_validation: false,
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded configuration.
    pub config: WorkspaceConfiguration,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - A required environment variable is unset
    /// - YAML parsing or deserialization fails
    /// - The file contains an unknown top-level key
    /// - Validation fails
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.options.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.options.max_config_size),
            });
        }

        let raw_content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: format!("Failed to read configuration: {e}"),
        })?;

        self.load_str(&raw_content, path)
    }

    /// Loads and validates configuration text; `source_path` is only used
    /// in diagnostics.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load`], minus file access failures.
    pub fn load_str(&self, raw_content: &str, source_path: &Path) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();

        // Handle UTF-8 BOM
        let raw_content = raw_content.strip_prefix('\u{feff}').unwrap_or(raw_content);

        // Stage 1: Environment variable substitution (before YAML parsing)
        let mut env_sub = EnvSubstitution::new();
        let substituted = env_sub.substitute(raw_content, source_path)?;
        warnings.extend(env_sub.warnings);

        // Stage 2: YAML parsing
        let root: Value =
            serde_yaml::from_str(&substituted).map_err(|e| ConfigError::ParseError {
                path: source_path.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        if root.is_null() {
            return Err(ConfigError::ParseError {
                path: source_path.to_path_buf(),
                line: None,
                message: "Configuration file is empty".to_string(),
            });
        }

        // Stage 3: Unknown keys
        check_top_level_keys(&root, source_path)?;

        // Stage 4: Deserialize to typed config
        let config: WorkspaceConfiguration =
            serde_yaml::from_value(root).map_err(|e| ConfigError::ParseError {
                path: source_path.to_path_buf(),
                line: None,
                message: format!("Failed to deserialize configuration: {e}"),
            })?;

        // Stage 5: Validation
        if !self.options.skip_validation {
            let result = Validator::new().validate(&config);
            if let Some(errors) = ValidationErrors::new(result.errors) {
                return Err(ConfigError::Validation {
                    path: source_path.to_path_buf(),
                    errors,
                });
            }
            warnings.extend(result.warnings.into_iter().map(|issue| LoadWarning {
                message: issue.message,
                location: Some(issue.field),
            }));
        }

        tracing::debug!(
            path = %source_path.display(),
            warnings = warnings.len(),
            "configuration loaded"
        );

        Ok(LoadResult { config, warnings })
    }
}

// ============================================================================
// Unknown Keys
// ============================================================================

/// Rejects top-level keys that are not workspace configuration fields.
fn check_top_level_keys(root: &Value, source_path: &Path) -> Result<(), ConfigError> {
    let Value::Mapping(mapping) = root else {
        return Err(ConfigError::ParseError {
            path: source_path.to_path_buf(),
            line: None,
            message: "Configuration root must be a mapping".to_string(),
        });
    };

    for key in mapping.keys() {
        let Some(key) = key.as_str() else {
            return Err(ConfigError::InvalidValue {
                field: "<root>".to_string(),
                value: format!("{key:?}"),
                expected: "string keys".to_string(),
            });
        };
        if !WorkspaceConfiguration::FIELDS.contains(&key) {
            return Err(ConfigError::UnknownField {
                field: key.to_string(),
                suggestion: suggest_field(key),
            });
        }
    }
    Ok(())
}

/// Suggests the closest known field for typo correction.
///
/// Returns the closest match if its Damerau-Levenshtein distance is ≤ 3.
#[must_use]
pub fn suggest_field(input: &str) -> Option<String> {
    WorkspaceConfiguration::FIELDS
        .iter()
        .map(|field| (*field, strsim::damerau_levenshtein(input, field)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(field, _)| field.to_string())
}

// ============================================================================
// Environment Variable Substitution
// ============================================================================

/// Environment variable substitution handler.
struct EnvSubstitution {
    warnings: Vec<LoadWarning>,
}

impl EnvSubstitution {
    const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Substitutes environment variables in raw YAML text.
    ///
    /// Supports:
    /// - `${VAR}` - expand to value (empty string if unset with warning)
    /// - `${VAR:-default}` - expand to default if unset
    /// - `${VAR:?message}` - fail if unset
    /// - `$$` - literal `$`
    fn substitute(&mut self, raw_yaml: &str, source_path: &Path) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(raw_yaml.len());
        let mut chars = raw_yaml.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                    result.push('$');
                }
                Some('{') => {
                    chars.next();
                    let (var_name, default, error_msg) = Self::parse_var_spec(&mut chars)
                        .ok_or_else(|| ConfigError::ParseError {
                            path: source_path.to_path_buf(),
                            line: None,
                            message: "Unclosed environment variable reference".to_string(),
                        })?;

                    match std::env::var(&var_name) {
                        Ok(value) => result.push_str(&value),
                        Err(_) => {
                            if let Some(default_val) = default {
                                result.push_str(&default_val);
                            } else if let Some(msg) = error_msg {
                                return Err(ConfigError::EnvVarNotSet {
                                    var: var_name,
                                    location: msg,
                                });
                            } else {
                                self.warnings.push(LoadWarning {
                                    message: format!(
                                        "Environment variable '{var_name}' is not set, using empty string"
                                    ),
                                    location: Some(source_path.display().to_string()),
                                });
                            }
                        }
                    }
                }
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    /// Parses a variable specification from `${...}`.
    ///
    /// Returns (`var_name`, `default_value`, `error_message`), or `None`
    /// if the reference is never closed.
    fn parse_var_spec(
        chars: &mut std::iter::Peekable<std::str::Chars>,
    ) -> Option<(String, Option<String>, Option<String>)> {
        let mut var_name = String::new();

        while let Some(c) = chars.next() {
            match c {
                '}' => return Some((var_name, None, None)),
                ':' => match chars.peek() {
                    Some('-') => {
                        chars.next();
                        let default = Self::read_until_close(chars)?;
                        return Some((var_name, Some(default), None));
                    }
                    Some('?') => {
                        chars.next();
                        let msg = Self::read_until_close(chars)?;
                        return Some((var_name, None, Some(msg)));
                    }
                    _ => var_name.push(':'),
                },
                _ => var_name.push(c),
            }
        }

        None
    }

    /// Reads content until closing `}`, handling nested braces.
    fn read_until_close(chars: &mut std::iter::Peekable<std::str::Chars>) -> Option<String> {
        let mut value = String::new();
        let mut depth = 1;

        for c in chars.by_ref() {
            match c {
                '{' => {
                    depth += 1;
                    value.push(c);
                }
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(value);
                    }
                    value.push(c);
                }
                _ => value.push(c),
            }
        }

        None
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Returns the path used in diagnostics for in-memory configuration text.
#[must_use]
pub fn inline_source() -> PathBuf {
    PathBuf::from("<inline>")
}
