//! Shared integration-test helpers for spawning the `grafana-workspace`
//! binary against YAML fixtures.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Absolute path of a file under `tests/fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Runs the binary with `args` and waits for it to exit.
///
/// Environment variables that would change the stack environment are
/// cleared so assertions stay deterministic.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grafana-workspace"))
        .args(args)
        .env_remove("GRAFANA_WORKSPACE_STACK_NAME")
        .env_remove("GRAFANA_WORKSPACE_ACCOUNT")
        .env_remove("GRAFANA_WORKSPACE_REGION")
        .env_remove("GRAFANA_WORKSPACE_PARTITION")
        .env_remove("GRAFANA_WORKSPACE_LOG_LEVEL")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to spawn grafana-workspace")
}

/// Parses stdout as JSON, panicking with the raw text on failure.
#[allow(clippy::missing_panics_doc)]
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid JSON ({e}): {stdout}"))
}
