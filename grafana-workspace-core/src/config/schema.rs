//! Workspace configuration schema types
//!
//! This module defines the configuration accepted for a managed Grafana
//! workspace. These types are deserialized from YAML or JSON files using
//! the camelCase field names of the managed service.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value;

// ============================================================================
// Enumerated Domains
// ============================================================================

/// How the workspace obtains the IAM permissions it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionType {
    /// Roles and permissions are managed by the account owner
    CustomerManaged,
    /// The managed service provisions roles and permissions itself
    ServiceManaged,
}

impl PermissionType {
    /// Wire representation of the permission type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CustomerManaged => "CUSTOMER_MANAGED",
            Self::ServiceManaged => "SERVICE_MANAGED",
        }
    }
}

impl fmt::Display for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity source used to sign users into the workspace console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationProvider {
    /// IAM Identity Center
    AwsSso,
    /// SAML 2.0 identity provider
    Saml,
}

impl AuthenticationProvider {
    /// Wire representation of the provider.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AwsSso => "AWS_SSO",
            Self::Saml => "SAML",
        }
    }
}

impl fmt::Display for AuthenticationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grafana release line run by the workspace.
///
/// Accepts both quoted strings and bare YAML numbers (`9.4`) on input;
/// always serializes as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrafanaVersion {
    /// Grafana 8.4
    V8_4,
    /// Grafana 9.4
    V9_4,
    /// Grafana 10.4
    V10_4,
}

impl GrafanaVersion {
    /// All supported versions, oldest first.
    pub const ALL: [Self; 3] = [Self::V8_4, Self::V9_4, Self::V10_4];

    /// Wire representation of the version.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V8_4 => "8.4",
            Self::V9_4 => "9.4",
            Self::V10_4 => "10.4",
        }
    }
}

impl fmt::Display for GrafanaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unsupported Grafana version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported grafana version '{0}', expected one of 8.4, 9.4, 10.4")]
pub struct UnsupportedGrafanaVersion(pub String);

impl FromStr for GrafanaVersion {
    type Err = UnsupportedGrafanaVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnsupportedGrafanaVersion(s.to_string()))
    }
}

impl Serialize for GrafanaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GrafanaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl Visitor<'_> for VersionVisitor {
            type Value = GrafanaVersion;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a grafana version string such as \"9.4\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                // `10.4` and `9.4` as YAML floats print back to their literal
                self.visit_str(&v.to_string())
            }
        }

        deserializer.deserialize_any(VersionVisitor)
    }
}

// ============================================================================
// Deferred Values
// ============================================================================

/// Opaque handle to a value resolved later by the synthesis engine.
///
/// Written in configuration files as `{ ref: "<token>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceHandle {
    #[serde(rename = "ref")]
    token: String,
}

impl ReferenceHandle {
    /// Creates a handle for the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The token text, as supplied.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// A field value that is either known now or late-bound.
///
/// Validation and mapping only ever branch on the variant; the contents
/// of a `Reference` are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Deferred<T> {
    /// A reference to be resolved by the synthesis engine.
    Reference(ReferenceHandle),
    /// A concrete value.
    Literal(T),
}

impl<T> Deferred<T> {
    /// Returns the concrete value, if this is a literal.
    pub const fn literal(&self) -> Option<&T> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Reference(_) => None,
        }
    }

    /// Returns `true` if the value is late-bound.
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// Converts a literal with `f`, carrying a reference over unchanged.
    pub fn map<'a, U>(&'a self, f: impl FnOnce(&'a T) -> U) -> Deferred<U> {
        match self {
            Self::Reference(handle) => Deferred::Reference(handle.clone()),
            Self::Literal(value) => Deferred::Literal(f(value)),
        }
    }
}

/// A mapping whose only key is `ref` with a string value is a reference;
/// anything else is deserialized as `T`, keeping `T`'s own error.
impl<'de, T: DeserializeOwned> Deserialize<'de> for Deferred<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Value::Mapping(mapping) = &value
            && mapping.len() == 1
            && let Some(Value::String(token)) = mapping.get("ref")
        {
            return Ok(Self::Reference(ReferenceHandle::new(token.clone())));
        }
        serde_yaml::from_value(value)
            .map(Self::Literal)
            .map_err(de::Error::custom)
    }
}

impl<T> From<T> for Deferred<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

// ============================================================================
// Workspace Configuration
// ============================================================================

/// Configuration of a managed Grafana workspace.
///
/// Immutable once constructed; the three required fields are set through
/// [`WorkspaceConfiguration::new`] and every optional field starts absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkspaceConfiguration {
    /// Whether the workspace reads resources from this account only
    /// (`CURRENT_ACCOUNT`) or from the organization (`ORGANIZATION`)
    pub account_access_type: String,

    /// Identity sources for signing in to the workspace
    pub authentication_providers: Vec<AuthenticationProvider>,

    /// Who manages the IAM roles the workspace uses
    pub permission_type: PermissionType,

    /// Idempotency token for the create request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    /// Data sources with service-provisioned roles (service-managed only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<Vec<String>>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Grafana release line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grafana_version: Option<GrafanaVersion>,

    /// Workspace display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Network access restrictions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_access_control: Option<Deferred<NetworkAccessControl>>,

    /// Notification channels with service-provisioned roles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_destinations: Option<Vec<String>>,

    /// IAM role used to access resources through Organizations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_role_name: Option<String>,

    /// Organizational units the workspace may read data from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizational_units: Option<Vec<String>>,

    /// Whether plugin administration is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_admin_enabled: Option<Deferred<bool>>,

    /// IAM role granting access to the workspace's data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,

    /// SAML settings when SAML is an authentication provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saml_configuration: Option<Deferred<SamlConfiguration>>,

    /// Stack set used to generate the workspace's IAM roles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_set_name: Option<String>,

    /// VPC containing data sources the workspace connects to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_configuration: Option<Deferred<VpcConfiguration>>,
}

impl WorkspaceConfiguration {
    /// Top-level keys accepted in configuration files.
    pub const FIELDS: [&'static str; 17] = [
        "accountAccessType",
        "authenticationProviders",
        "permissionType",
        "clientToken",
        "dataSources",
        "description",
        "grafanaVersion",
        "name",
        "networkAccessControl",
        "notificationDestinations",
        "organizationRoleName",
        "organizationalUnits",
        "pluginAdminEnabled",
        "roleArn",
        "samlConfiguration",
        "stackSetName",
        "vpcConfiguration",
    ];

    /// Creates a configuration with the required fields set and every
    /// optional field absent.
    pub fn new(
        account_access_type: impl Into<String>,
        authentication_providers: Vec<AuthenticationProvider>,
        permission_type: PermissionType,
    ) -> Self {
        Self {
            account_access_type: account_access_type.into(),
            authentication_providers,
            permission_type,
            client_token: None,
            data_sources: None,
            description: None,
            grafana_version: None,
            name: None,
            network_access_control: None,
            notification_destinations: None,
            organization_role_name: None,
            organizational_units: None,
            plugin_admin_enabled: None,
            role_arn: None,
            saml_configuration: None,
            stack_set_name: None,
            vpc_configuration: None,
        }
    }
}

// ============================================================================
// Nested Structures
// ============================================================================

/// Network access restrictions for the workspace endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NetworkAccessControl {
    /// Prefix list IDs allowed to reach the workspace
    #[serde(default)]
    pub prefix_list_ids: Vec<String>,
    /// VPC endpoint IDs allowed to reach the workspace
    #[serde(default)]
    pub vpce_ids: Vec<String>,
}

/// VPC the workspace attaches to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VpcConfiguration {
    /// Security groups attached to the workspace network interfaces
    pub security_group_ids: Vec<String>,
    /// Subnets the workspace network interfaces are placed in
    pub subnet_ids: Vec<String>,
}

/// SAML integration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SamlConfiguration {
    /// Identity provider metadata
    pub idp_metadata: Deferred<IdpMetadata>,

    /// Organizations in the assertion that may use the workspace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_organizations: Option<Vec<String>>,

    /// Assertion attribute names mapped to user information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertion_attributes: Option<Deferred<AssertionAttributes>>,

    /// Session length in minutes before a SAML user must sign in again
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_validity_duration: Option<f64>,

    /// Assertion groups granted the Admin and Editor roles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_values: Option<Deferred<RoleValues>>,
}

impl SamlConfiguration {
    /// Creates a SAML configuration with only identity provider metadata.
    pub fn new(idp_metadata: impl Into<Deferred<IdpMetadata>>) -> Self {
        Self {
            idp_metadata: idp_metadata.into(),
            allowed_organizations: None,
            assertion_attributes: None,
            login_validity_duration: None,
            role_values: None,
        }
    }
}

/// Identity provider metadata, by location or inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IdpMetadata {
    /// URL of the metadata document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Full metadata document in XML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml: Option<String>,
}

/// Names of the SAML assertion attributes holding user information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssertionAttributes {
    /// Attribute holding the user's email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Attribute holding the user's groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<String>,
    /// Attribute holding the login name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// Attribute holding the display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Attribute holding the user's organizations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// Attribute holding the user's role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Assertion groups mapped to Grafana roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoleValues {
    /// Groups granted the Admin role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<Vec<String>>,
    /// Groups granted the Editor role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<Vec<String>>,
}
