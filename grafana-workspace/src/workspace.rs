//! Workspace resource mapping
//!
//! [`Workspace::new`] is the single construction entry point: it validates
//! a [`WorkspaceConfiguration`], registers the matching
//! [`WorkspaceSpecification`] with the container's synthesis engine and
//! derives the workspace's public attributes from the returned handle.
//!
//! Validation always completes before anything is registered, so a
//! rejected configuration leaves the container untouched.

use grafana_workspace_core::config::{WorkspaceConfiguration, validate};
use grafana_workspace_core::error::ValidationErrors;
use thiserror::Error;

use crate::observability::metrics;
use crate::resource::{ArnComponents, ResourceContainer, ResourceHandle, WorkspaceSpecification};

/// Service namespace used in workspace ARNs.
pub const SERVICE: &str = "grafana";

/// Resource type token used in workspace ARNs.
pub const RESOURCE_TYPE: &str = "workspace";

/// Errors raised while constructing a [`Workspace`].
#[derive(Debug, Error)]
pub enum WorkspaceError<E: std::error::Error + 'static> {
    /// The configuration violated one or more rules; nothing was registered
    #[error("invalid workspace configuration: {0}")]
    Validation(ValidationErrors),

    /// The synthesis engine rejected the specification
    #[error(transparent)]
    Synthesis(E),
}

/// A managed Grafana workspace registered with a resource container.
///
/// Both derived attributes are resolved from the handle the engine
/// returned, so they always refer to the same registered resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    workspace_version: String,
    workspace_name: String,
    handle: ResourceHandle,
    specification: WorkspaceSpecification,
}

impl Workspace {
    /// Validates `config` and registers a workspace under `identity` in
    /// `container`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Validation`] with every violated rule if
    /// the configuration is invalid, or [`WorkspaceError::Synthesis`] with
    /// the engine's error unchanged if registration fails.
    pub fn new<C: ResourceContainer>(
        container: &mut C,
        identity: &str,
        config: &WorkspaceConfiguration,
    ) -> Result<Self, WorkspaceError<C::Error>> {
        let span = tracing::debug_span!("workspace", identity);
        let _guard = span.enter();

        let warnings = match validate(config).into_result() {
            Ok(warnings) => warnings,
            Err(errors) => {
                tracing::debug!(errors = errors.len(), "configuration rejected");
                metrics::record_validation(false);
                return Err(WorkspaceError::Validation(errors));
            }
        };
        metrics::record_validation(true);
        for warning in &warnings {
            tracing::warn!(field = %warning.field, "{}", warning.message);
        }

        let specification = WorkspaceSpecification::from(config);
        let handle = container
            .synthesize(identity, &specification)
            .map_err(WorkspaceError::Synthesis)?;

        let physical_name = container.assign_physical_name(handle.identity());
        let workspace_version = container.resolve_resource_arn(
            &ArnComponents {
                service: SERVICE,
                resource: RESOURCE_TYPE,
                resource_name: &physical_name,
            },
            handle.arn_attribute(),
        );
        let workspace_name = container.resolve_name(handle.ref_attribute());

        tracing::debug!(%workspace_version, %workspace_name, "workspace attributes resolved");

        Ok(Self {
            workspace_version,
            workspace_name,
            handle,
            specification,
        })
    }

    /// Fully-qualified identifier derived from the engine's ARN attribute.
    #[must_use]
    pub fn workspace_version(&self) -> &str {
        &self.workspace_version
    }

    /// Name resolved from the engine's logical reference.
    #[must_use]
    pub fn workspace_name(&self) -> &str {
        &self.workspace_name
    }

    /// Handle to the registered resource.
    #[must_use]
    pub const fn handle(&self) -> &ResourceHandle {
        &self.handle
    }

    /// Attribute set that was registered.
    #[must_use]
    pub const fn specification(&self) -> &WorkspaceSpecification {
        &self.specification
    }
}
