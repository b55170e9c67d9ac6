//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod synth;
pub mod validate;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::GrafanaWorkspaceError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), GrafanaWorkspaceError> {
    match cli.command {
        Commands::Validate(args) => validate::run(&args),
        Commands::Synth(args) => synth::run(args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
