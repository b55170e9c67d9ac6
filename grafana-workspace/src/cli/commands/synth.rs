//! Workspace synthesis command.
//!
//! Builds a [`Workspace`] in a fresh in-memory [`Stack`] and prints the
//! derived attributes together with the registered resources.

use serde_json::json;

use crate::cli::args::SynthArgs;
use crate::config::{ConfigLoader, LoaderOptions};
use crate::error::GrafanaWorkspaceError;
use crate::resource::Stack;
use crate::workspace::Workspace;

/// Synthesize a workspace from a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, the configuration is
/// invalid, or the stack rejects the registration.
pub fn run(args: SynthArgs) -> Result<(), GrafanaWorkspaceError> {
    // Validation is left to Workspace::new so rejections carry its error type.
    let loader = ConfigLoader::new(LoaderOptions {
        skip_validation: true,
        ..LoaderOptions::default()
    });
    let loaded = loader.load(&args.file)?;
    for warning in &loaded.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    let mut stack = Stack::new(args.stack.into());
    let workspace = Workspace::new(&mut stack, &args.id, &loaded.config)?;

    let output = json!({
        "workspaceVersion": workspace.workspace_version(),
        "workspaceName": workspace.workspace_name(),
        "resources": stack.to_json(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
