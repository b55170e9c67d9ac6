//! CLI argument definitions
//!
//! All Clap derive structs for `grafana-workspace` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;
use crate::resource::StackEnvironment;

// ============================================================================
// Root CLI
// ============================================================================

/// Validate and synthesize managed Grafana workspace configurations.
#[derive(Parser, Debug)]
#[command(name = "grafana-workspace", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(
        long,
        default_value = "auto",
        global = true,
        env = "GRAFANA_WORKSPACE_COLOR"
    )]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(
        long,
        default_value = "human",
        global = true,
        env = "GRAFANA_WORKSPACE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate workspace configuration files.
    Validate(ValidateArgs),

    /// Build a workspace in an in-memory stack and print the result.
    Synth(SynthArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Treat warnings as failures.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `synth`.
#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Workspace configuration file.
    pub file: PathBuf,

    /// Identity to register the workspace under.
    #[arg(long, default_value = "Workspace")]
    pub id: String,

    /// Stack environment.
    #[command(flatten)]
    pub stack: StackArgs,
}

/// Stack environment flags shared by commands that synthesize.
#[derive(Args, Debug, Clone)]
pub struct StackArgs {
    /// Stack name, used as the physical name prefix.
    #[arg(
        long,
        default_value = "GrafanaStack",
        env = "GRAFANA_WORKSPACE_STACK_NAME"
    )]
    pub stack_name: String,

    /// Account ID used in derived ARNs.
    #[arg(long, default_value = "123456789012", env = "GRAFANA_WORKSPACE_ACCOUNT")]
    pub account: String,

    /// Region used in derived ARNs.
    #[arg(long, default_value = "us-east-1", env = "GRAFANA_WORKSPACE_REGION")]
    pub region: String,

    /// ARN partition.
    #[arg(long, default_value = "aws", env = "GRAFANA_WORKSPACE_PARTITION")]
    pub partition: String,
}

impl From<StackArgs> for StackEnvironment {
    fn from(args: StackArgs) -> Self {
        Self {
            stack_name: args.stack_name,
            account: args.account,
            region: args.region,
            partition: args.partition,
        }
    }
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Command output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validate_multiple_files() {
        let cli = Cli::try_parse_from([
            "grafana-workspace",
            "validate",
            "a.yaml",
            "b.yaml",
            "--format",
            "json",
            "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.strict);
            }
            other => panic!("expected validate, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_requires_files() {
        assert!(Cli::try_parse_from(["grafana-workspace", "validate"]).is_err());
    }

    #[test]
    fn test_synth_defaults() {
        let cli = Cli::try_parse_from(["grafana-workspace", "synth", "w.yaml"]).unwrap();
        match cli.command {
            Commands::Synth(args) => {
                assert_eq!(args.id, "Workspace");
                let env = StackEnvironment::from(args.stack);
                assert_eq!(env.partition, "aws");
            }
            other => panic!("expected synth, got {other:?}"),
        }
    }

    #[test]
    fn test_synth_stack_flags() {
        let cli = Cli::try_parse_from([
            "grafana-workspace",
            "synth",
            "w.yaml",
            "--id",
            "Dashboards",
            "--stack-name",
            "Prod",
            "--region",
            "eu-west-1",
        ])
        .unwrap();
        match cli.command {
            Commands::Synth(args) => {
                assert_eq!(args.id, "Dashboards");
                assert_eq!(args.stack.stack_name, "Prod");
                assert_eq!(args.stack.region, "eu-west-1");
            }
            other => panic!("expected synth, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "grafana-workspace",
            "version",
            "-vv",
            "--color",
            "never",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_completions_powershell() {
        let cli = Cli::try_parse_from(["grafana-workspace", "completions", "powershell"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions(CompletionsArgs {
                shell: Shell::PowerShell
            })
        ));
    }
}
