//! Metrics recorded while validating and registering workspaces.
//!
//! Uses the `metrics` facade only. Without an installed recorder every
//! call is a no-op, so embedding applications choose the exporter.

use metrics::{counter, describe_counter};

/// Counter of configurations validated by the resource mapper.
pub const VALIDATIONS_TOTAL: &str = "grafana_workspace_validations_total";

/// Counter of resources registered with a stack.
pub const RESOURCES_TOTAL: &str = "grafana_workspace_resources_total";

/// Registers metric descriptions with the global recorder.
pub fn describe_metrics() {
    describe_counter!(
        VALIDATIONS_TOTAL,
        "Total number of workspace configurations validated, by outcome"
    );
    describe_counter!(
        RESOURCES_TOTAL,
        "Total number of resources registered, by resource type"
    );
}

/// Records the outcome of one configuration validation.
pub fn record_validation(valid: bool) {
    let outcome = if valid { "valid" } else { "invalid" };
    counter!(VALIDATIONS_TOTAL, "outcome" => outcome).increment(1);
}

/// Records one resource registration.
pub fn record_resource_registered(resource_type: &'static str) {
    counter!(RESOURCES_TOTAL, "resource_type" => resource_type).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_does_not_panic() {
        describe_metrics();
        record_validation(true);
        record_validation(false);
        record_resource_registered("AWS::Grafana::Workspace");
    }
}
