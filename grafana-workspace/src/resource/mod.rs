//! Resource container and synthesis engine contracts
//!
//! The resource mapper never talks to a provisioning backend directly. It
//! hands a [`ResourceSpecification`] to a [`SynthesisEngine`], receives a
//! [`ResourceHandle`] carrying engine-assigned attribute references, and
//! resolves those references through the owning [`ResourceContainer`].

pub mod specification;
pub mod stack;

use std::fmt;

use serde::Serialize;

pub use specification::WorkspaceSpecification;
pub use stack::{RegisteredResource, Stack, StackEnvironment, StackError};

// ============================================================================
// Attribute References
// ============================================================================

/// Reference to a value the synthesis engine assigns to a resource.
///
/// Either a named attribute of the resource or the resource's own logical
/// reference. Rendered as a token so the value stays late-bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeRef {
    identity: String,
    attribute: Option<String>,
}

impl AttributeRef {
    /// Reference to the named attribute of the resource registered under
    /// `identity`.
    pub fn attribute(identity: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            attribute: Some(attribute.into()),
        }
    }

    /// Logical reference to the resource registered under `identity`.
    pub fn logical(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            attribute: None,
        }
    }

    /// Identity of the resource the reference points at.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Attribute name, or `None` for a logical reference.
    #[must_use]
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute.as_deref()
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attribute) => write!(f, "${{Token[{}.{attribute}]}}", self.identity),
            None => write!(f, "${{Token[{}.Ref]}}", self.identity),
        }
    }
}

/// Components of a resource ARN that do not come from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArnComponents<'a> {
    /// Service namespace (e.g. `grafana`)
    pub service: &'a str,
    /// Resource type within the service (e.g. `workspace`)
    pub resource: &'a str,
    /// Physical name of the resource instance
    pub resource_name: &'a str,
}

// ============================================================================
// Handles and Specifications
// ============================================================================

/// Engine-side handle to a registered resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    identity: String,
    resource_type: &'static str,
    arn_attribute: AttributeRef,
    ref_attribute: AttributeRef,
}

impl ResourceHandle {
    /// Creates a handle for a resource of type `S` registered under
    /// `identity`. Both attribute references are derived from that same
    /// identity.
    pub fn new<S: ResourceSpecification>(identity: impl Into<String>) -> Self {
        let identity = identity.into();
        Self {
            arn_attribute: AttributeRef::attribute(identity.clone(), S::ARN_ATTRIBUTE),
            ref_attribute: AttributeRef::logical(identity.clone()),
            resource_type: S::RESOURCE_TYPE,
            identity,
        }
    }

    /// Identity the resource was registered under.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Resource type literal of the downstream model.
    #[must_use]
    pub const fn resource_type(&self) -> &'static str {
        self.resource_type
    }

    /// Reference to the ARN-bearing attribute.
    #[must_use]
    pub const fn arn_attribute(&self) -> &AttributeRef {
        &self.arn_attribute
    }

    /// Logical reference to the resource.
    #[must_use]
    pub const fn ref_attribute(&self) -> &AttributeRef {
        &self.ref_attribute
    }
}

/// An attribute set accepted by a synthesis engine.
pub trait ResourceSpecification: Serialize {
    /// Resource type literal of the downstream model.
    const RESOURCE_TYPE: &'static str;

    /// Name of the attribute that carries the resource's ARN-derived value.
    const ARN_ATTRIBUTE: &'static str;
}

// ============================================================================
// Contracts
// ============================================================================

/// Turns resource specifications into registered resources.
pub trait SynthesisEngine {
    /// Engine failure, propagated to callers unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Registers `specification` under `identity`.
    ///
    /// # Errors
    ///
    /// Returns the engine's own error, e.g. when `identity` is already
    /// taken.
    fn synthesize<S: ResourceSpecification>(
        &mut self,
        identity: &str,
        specification: &S,
    ) -> Result<ResourceHandle, Self::Error>;
}

/// The owning scope of a resource: assigns names and resolves references.
pub trait ResourceContainer: SynthesisEngine {
    /// Physical name assigned to the resource registered under `identity`.
    fn assign_physical_name(&self, identity: &str) -> String;

    /// Resolves an ARN attribute into a fully-qualified identifier.
    fn resolve_resource_arn(
        &self,
        components: &ArnComponents<'_>,
        attribute: &AttributeRef,
    ) -> String;

    /// Resolves a logical reference into the resource's name.
    fn resolve_name(&self, name_ref: &AttributeRef) -> String;
}
