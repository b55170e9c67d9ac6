//! `grafana-workspace` - managed Grafana workspace configuration tool

use clap::Parser;

use grafana_workspace::cli::args::Cli;
use grafana_workspace::cli::commands;
use grafana_workspace::error::ExitCode;
use grafana_workspace::observability::{describe_metrics, init_logging};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here and are not failures
            let code = if e.use_stderr() {
                ExitCode::USAGE_ERROR
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }
    describe_metrics();

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
