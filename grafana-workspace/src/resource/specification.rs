//! Workspace attribute set handed to the synthesis engine.
//!
//! Configuration files use camelCase keys; the attribute set uses the
//! downstream model's PascalCase property names at every level, so the
//! nested structures get their own output types here.

use grafana_workspace_core::config::{
    AssertionAttributes, AuthenticationProvider, Deferred, GrafanaVersion, IdpMetadata,
    NetworkAccessControl, PermissionType, RoleValues, SamlConfiguration, VpcConfiguration,
    WorkspaceConfiguration,
};
use serde::Serialize;

use crate::resource::ResourceSpecification;

/// Attribute set of an `AWS::Grafana::Workspace` resource.
///
/// Every configuration field is copied verbatim. Absent optionals are
/// omitted entirely rather than emitted as empty values, and deferred
/// references pass through as they were configured.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkspaceSpecification {
    pub account_access_type: String,
    pub authentication_providers: Vec<AuthenticationProvider>,
    pub permission_type: PermissionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grafana_version: Option<GrafanaVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_access_control: Option<Deferred<NetworkAccessControlProperty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_destinations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizational_units: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_admin_enabled: Option<Deferred<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml_configuration: Option<Deferred<SamlConfigurationProperty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_set_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_configuration: Option<Deferred<VpcConfigurationProperty>>,
}

impl ResourceSpecification for WorkspaceSpecification {
    const RESOURCE_TYPE: &'static str = "AWS::Grafana::Workspace";
    const ARN_ATTRIBUTE: &'static str = "GrafanaVersion";
}

impl From<&WorkspaceConfiguration> for WorkspaceSpecification {
    fn from(config: &WorkspaceConfiguration) -> Self {
        Self {
            account_access_type: config.account_access_type.clone(),
            authentication_providers: config.authentication_providers.clone(),
            permission_type: config.permission_type,

            // the properties below are optional
            client_token: config.client_token.clone(),
            data_sources: config.data_sources.clone(),
            description: config.description.clone(),
            grafana_version: config.grafana_version,
            name: config.name.clone(),
            network_access_control: config
                .network_access_control
                .as_ref()
                .map(|nac| nac.map(NetworkAccessControlProperty::from)),
            notification_destinations: config.notification_destinations.clone(),
            organization_role_name: config.organization_role_name.clone(),
            organizational_units: config.organizational_units.clone(),
            plugin_admin_enabled: config.plugin_admin_enabled.clone(),
            role_arn: config.role_arn.clone(),
            saml_configuration: config
                .saml_configuration
                .as_ref()
                .map(|saml| saml.map(SamlConfigurationProperty::from)),
            stack_set_name: config.stack_set_name.clone(),
            vpc_configuration: config
                .vpc_configuration
                .as_ref()
                .map(|vpc| vpc.map(VpcConfigurationProperty::from)),
        }
    }
}

// ============================================================================
// Nested Properties
// ============================================================================

/// `NetworkAccessControl` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkAccessControlProperty {
    pub prefix_list_ids: Vec<String>,
    pub vpce_ids: Vec<String>,
}

impl From<&NetworkAccessControl> for NetworkAccessControlProperty {
    fn from(nac: &NetworkAccessControl) -> Self {
        Self {
            prefix_list_ids: nac.prefix_list_ids.clone(),
            vpce_ids: nac.vpce_ids.clone(),
        }
    }
}

/// `VpcConfiguration` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcConfigurationProperty {
    pub security_group_ids: Vec<String>,
    pub subnet_ids: Vec<String>,
}

impl From<&VpcConfiguration> for VpcConfigurationProperty {
    fn from(vpc: &VpcConfiguration) -> Self {
        Self {
            security_group_ids: vpc.security_group_ids.clone(),
            subnet_ids: vpc.subnet_ids.clone(),
        }
    }
}

/// `SamlConfiguration` property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SamlConfigurationProperty {
    pub idp_metadata: Deferred<IdpMetadataProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_organizations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_attributes: Option<Deferred<AssertionAttributesProperty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_validity_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_values: Option<Deferred<RoleValuesProperty>>,
}

impl From<&SamlConfiguration> for SamlConfigurationProperty {
    fn from(saml: &SamlConfiguration) -> Self {
        Self {
            idp_metadata: saml.idp_metadata.map(IdpMetadataProperty::from),
            allowed_organizations: saml.allowed_organizations.clone(),
            assertion_attributes: saml
                .assertion_attributes
                .as_ref()
                .map(|attrs| attrs.map(AssertionAttributesProperty::from)),
            login_validity_duration: saml.login_validity_duration,
            role_values: saml
                .role_values
                .as_ref()
                .map(|roles| roles.map(RoleValuesProperty::from)),
        }
    }
}

/// `IdpMetadata` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdpMetadataProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<String>,
}

impl From<&IdpMetadata> for IdpMetadataProperty {
    fn from(metadata: &IdpMetadata) -> Self {
        Self {
            url: metadata.url.clone(),
            xml: metadata.xml.clone(),
        }
    }
}

/// `AssertionAttributes` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssertionAttributesProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<&AssertionAttributes> for AssertionAttributesProperty {
    fn from(attrs: &AssertionAttributes) -> Self {
        Self {
            email: attrs.email.clone(),
            groups: attrs.groups.clone(),
            login: attrs.login.clone(),
            name: attrs.name.clone(),
            org: attrs.org.clone(),
            role: attrs.role.clone(),
        }
    }
}

/// `RoleValues` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleValuesProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<Vec<String>>,
}

impl From<&RoleValues> for RoleValuesProperty {
    fn from(roles: &RoleValues) -> Self {
        Self {
            admin: roles.admin.clone(),
            editor: roles.editor.clone(),
        }
    }
}
