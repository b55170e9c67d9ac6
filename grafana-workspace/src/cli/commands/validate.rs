//! Configuration validation command.
//!
//! Loads every file through the full loader pipeline and reports each
//! result instead of stopping at the first failure.

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{ConfigLoader, LoadWarning};
use crate::error::{ConfigError, GrafanaWorkspaceError, ValidationError};

/// Outcome of validating one file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    warnings: Vec<LoadWarning>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total: usize,
    valid: usize,
    invalid: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    files: Vec<FileReport>,
    summary: Summary,
}

/// Validate configuration files.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationFailed`] if any file fails to load or
/// validate, or (with `--strict`) produced warnings.
pub fn run(args: &ValidateArgs) -> Result<(), GrafanaWorkspaceError> {
    let loader = ConfigLoader::default();
    let files: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check_file(&loader, path, args.strict))
        .collect();

    let invalid = files.iter().filter(|f| !f.valid).count();
    let report = Report {
        summary: Summary {
            total: files.len(),
            valid: files.len() - invalid,
            invalid,
        },
        files,
    };

    match args.format {
        OutputFormat::Human => print_human(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if invalid > 0 {
        return Err(ConfigError::ValidationFailed { count: invalid }.into());
    }
    Ok(())
}

fn check_file(loader: &ConfigLoader, path: &Path, strict: bool) -> FileReport {
    tracing::info!(file = %path.display(), "validating configuration");
    let display = path.display().to_string();

    match loader.load(path) {
        Ok(result) => {
            for warning in &result.warnings {
                tracing::warn!(
                    location = warning.location.as_deref().unwrap_or("<unknown>"),
                    "{}",
                    warning.message
                );
            }
            FileReport {
                path: display,
                valid: !(strict && !result.warnings.is_empty()),
                errors: Vec::new(),
                message: None,
                warnings: result.warnings,
            }
        }
        Err(ConfigError::Validation { errors, .. }) => FileReport {
            path: display,
            valid: false,
            errors: errors.into_vec(),
            message: None,
            warnings: Vec::new(),
        },
        Err(e) => FileReport {
            path: display,
            valid: false,
            errors: Vec::new(),
            message: Some(e.to_string()),
            warnings: Vec::new(),
        },
    }
}

fn print_human(report: &Report) {
    for file in &report.files {
        let status = if file.valid { "ok" } else { "FAILED" };
        println!("{}: {status}", file.path);
        for error in &file.errors {
            println!("  error: {error}");
        }
        if let Some(message) = &file.message {
            println!("  error: {message}");
        }
        for warning in &file.warnings {
            match &warning.location {
                Some(location) => println!("  warning: {} ({location})", warning.message),
                None => println!("  warning: {}", warning.message),
            }
        }
    }
    let summary = &report.summary;
    println!(
        "{} file(s) checked, {} valid, {} invalid",
        summary.total, summary.valid, summary.invalid
    );
}
