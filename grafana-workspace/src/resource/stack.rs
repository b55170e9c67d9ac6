//! In-memory resource container
//!
//! `Stack` implements both [`ResourceContainer`] and [`SynthesisEngine`]
//! without talking to any backend. It backs the CLI's `synth` command and
//! the crate's tests.

use indexmap::IndexMap;
use serde_json::{Value, json};
use thiserror::Error;

use crate::observability::metrics;
use crate::resource::{
    ArnComponents, AttributeRef, ResourceContainer, ResourceHandle, ResourceSpecification,
    SynthesisEngine,
};

/// Errors raised while registering resources in a [`Stack`].
#[derive(Debug, Error)]
pub enum StackError {
    /// A resource is already registered under this identity
    #[error("there is already a resource with identity '{identity}' in stack '{stack}'")]
    DuplicateIdentity {
        /// The colliding identity
        identity: String,
        /// Name of the stack
        stack: String,
    },

    /// Identity is empty
    #[error("resource identity cannot be empty")]
    EmptyIdentity,

    /// Specification could not be converted into an attribute set
    #[error("failed to serialize resource properties: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Account and naming context of a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackEnvironment {
    /// Stack name, used as the physical name prefix
    pub stack_name: String,
    /// Twelve-digit account ID
    pub account: String,
    /// Region code
    pub region: String,
    /// ARN partition (`aws`, `aws-cn`, `aws-us-gov`)
    pub partition: String,
}

impl Default for StackEnvironment {
    fn default() -> Self {
        Self {
            stack_name: "GrafanaStack".to_string(),
            account: "123456789012".to_string(),
            region: "us-east-1".to_string(),
            partition: "aws".to_string(),
        }
    }
}

/// A resource registered in a stack.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredResource {
    /// Resource type literal
    pub resource_type: &'static str,
    /// Serialized attribute set
    pub properties: Value,
}

/// In-memory container and synthesis engine.
#[derive(Debug, Default)]
pub struct Stack {
    environment: StackEnvironment,
    resources: IndexMap<String, RegisteredResource>,
}

impl Stack {
    /// Creates an empty stack in the given environment.
    #[must_use]
    pub fn new(environment: StackEnvironment) -> Self {
        Self {
            environment,
            resources: IndexMap::new(),
        }
    }

    /// The stack's environment.
    #[must_use]
    pub const fn environment(&self) -> &StackEnvironment {
        &self.environment
    }

    /// Looks up the resource registered under `identity`.
    #[must_use]
    pub fn resource(&self, identity: &str) -> Option<&RegisteredResource> {
        self.resources.get(identity)
    }

    /// Iterates registered resources in registration order.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &RegisteredResource)> {
        self.resources.iter().map(|(id, r)| (id.as_str(), r))
    }

    /// Number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Renders registered resources as `{ identity: { Type, Properties } }`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let resources: serde_json::Map<String, Value> = self
            .resources
            .iter()
            .map(|(id, r)| {
                (
                    id.clone(),
                    json!({ "Type": r.resource_type, "Properties": r.properties }),
                )
            })
            .collect();
        Value::Object(resources)
    }
}

impl SynthesisEngine for Stack {
    type Error = StackError;

    fn synthesize<S: ResourceSpecification>(
        &mut self,
        identity: &str,
        specification: &S,
    ) -> Result<ResourceHandle, Self::Error> {
        if identity.is_empty() {
            return Err(StackError::EmptyIdentity);
        }
        if self.resources.contains_key(identity) {
            return Err(StackError::DuplicateIdentity {
                identity: identity.to_string(),
                stack: self.environment.stack_name.clone(),
            });
        }

        let properties = serde_json::to_value(specification)?;
        self.resources.insert(
            identity.to_string(),
            RegisteredResource {
                resource_type: S::RESOURCE_TYPE,
                properties,
            },
        );

        tracing::info!(
            stack = %self.environment.stack_name,
            identity,
            resource_type = S::RESOURCE_TYPE,
            "registered resource"
        );
        metrics::record_resource_registered(S::RESOURCE_TYPE);

        Ok(ResourceHandle::new::<S>(identity))
    }
}

impl ResourceContainer for Stack {
    fn assign_physical_name(&self, identity: &str) -> String {
        format!("{}-{identity}", self.environment.stack_name)
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect()
    }

    /// An empty `resource_name` resolves to the attribute token itself.
    /// `assign_physical_name` never yields one; only callers that
    /// pass their own components reach that branch.
    fn resolve_resource_arn(
        &self,
        components: &ArnComponents<'_>,
        attribute: &AttributeRef,
    ) -> String {
        if components.resource_name.is_empty() {
            return attribute.to_string();
        }
        let env = &self.environment;
        format!(
            "arn:{}:{}:{}:{}:{}/{}",
            env.partition,
            components.service,
            env.region,
            env.account,
            components.resource,
            components.resource_name
        )
    }

    fn resolve_name(&self, name_ref: &AttributeRef) -> String {
        name_ref.to_string()
    }
}
