//! End-to-end tests for workspace construction through the library API.

mod common;

use common::fixture_path;
use grafana_workspace::config::{
    AuthenticationProvider, ConfigLoader, Deferred, IdpMetadata, PermissionType,
    SamlConfiguration, WorkspaceConfiguration,
};
use grafana_workspace::error::Rule;
use grafana_workspace::resource::{Stack, StackEnvironment};
use grafana_workspace::{Workspace, WorkspaceError};
use serde_json::json;

fn minimal_config() -> WorkspaceConfiguration {
    WorkspaceConfiguration::new(
        "CURRENT_ACCOUNT",
        vec![AuthenticationProvider::AwsSso],
        PermissionType::ServiceManaged,
    )
}

#[test]
fn minimal_configuration_registers_three_properties() {
    let mut stack = Stack::default();
    let workspace = Workspace::new(&mut stack, "Workspace", &minimal_config()).unwrap();

    let resource = stack.resource("Workspace").expect("registered");
    assert_eq!(resource.resource_type, "AWS::Grafana::Workspace");
    assert!(resource.properties.get("Name").is_none());
    assert_eq!(
        resource.properties,
        json!({
            "AccountAccessType": "CURRENT_ACCOUNT",
            "AuthenticationProviders": ["AWS_SSO"],
            "PermissionType": "SERVICE_MANAGED",
        })
    );
    assert_eq!(workspace.workspace_name(), "${Token[Workspace.Ref]}");
}

#[test]
fn construction_is_deterministic_across_stacks() {
    let mut first = Stack::default();
    let mut second = Stack::default();
    let a = Workspace::new(&mut first, "Workspace", &minimal_config()).unwrap();
    let b = Workspace::new(&mut second, "Workspace", &minimal_config()).unwrap();

    assert_eq!(a, b);
    assert_eq!(first.to_json(), second.to_json());
}

#[test]
fn customer_managed_data_sources_leave_stack_empty() {
    let mut config = minimal_config();
    config.permission_type = PermissionType::CustomerManaged;
    config.data_sources = Some(vec!["PROMETHEUS".to_string(), "XRAY".to_string()]);

    let mut stack = Stack::default();
    let err = Workspace::new(&mut stack, "Workspace", &config).unwrap_err();
    let WorkspaceError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.has_field("dataSources"));
    assert!(stack.is_empty());
}

#[test]
fn customer_managed_without_data_sources_is_accepted() {
    let mut config = minimal_config();
    config.permission_type = PermissionType::CustomerManaged;
    config.data_sources = Some(Vec::new());

    let mut stack = Stack::default();
    Workspace::new(&mut stack, "Workspace", &config).unwrap();
    assert_eq!(
        stack.resource("Workspace").unwrap().properties["DataSources"],
        json!([])
    );
}

#[test]
fn every_violation_is_reported_together() {
    let mut config = minimal_config();
    config.client_token = Some(String::new());
    config.description = Some("d".repeat(2049));
    config.name = Some("no spaces allowed".to_string());

    let mut stack = Stack::default();
    let Err(WorkspaceError::Validation(errors)) = Workspace::new(&mut stack, "W", &config) else {
        panic!("expected validation error");
    };
    let rules: Vec<Rule> = errors.iter().map(|e| e.rule).collect();
    assert_eq!(
        rules,
        vec![Rule::ClientTokenFormat, Rule::DescriptionLength, Rule::NameFormat]
    );
}

#[test]
fn workspaces_share_a_stack_under_distinct_identities() {
    let mut stack = Stack::new(StackEnvironment {
        stack_name: "Observability".to_string(),
        ..StackEnvironment::default()
    });
    let primary = Workspace::new(&mut stack, "Primary", &minimal_config()).unwrap();

    let mut saml = minimal_config();
    saml.authentication_providers = vec![AuthenticationProvider::Saml];
    saml.saml_configuration = Some(Deferred::Literal(SamlConfiguration::new(IdpMetadata {
        url: Some("https://idp.example.com/metadata".to_string()),
        xml: None,
    })));
    let secondary = Workspace::new(&mut stack, "Secondary", &saml).unwrap();

    assert_eq!(stack.len(), 2);
    assert!(primary.workspace_version().ends_with("workspace/observability-primary"));
    assert!(secondary.workspace_version().ends_with("workspace/observability-secondary"));
    assert_ne!(primary.workspace_name(), secondary.workspace_name());
}

#[test]
fn loaded_fixture_round_trips_into_stack() {
    let loaded = ConfigLoader::default()
        .load(&fixture_path("full.yaml"))
        .unwrap();
    assert!(loaded.warnings.is_empty());

    let mut stack = Stack::default();
    let workspace = Workspace::new(&mut stack, "Workspace", &loaded.config).unwrap();
    assert_eq!(workspace.specification().name.as_deref(), Some("observability-dashboards"));

    let properties = &stack.resource("Workspace").unwrap().properties;
    assert_eq!(properties["ClientToken"], "deploy-2024-01");
    assert_eq!(properties["OrganizationalUnits"], json!(["ou-abcd-11111111"]));
    assert_eq!(
        properties["NetworkAccessControl"],
        json!({
            "PrefixListIds": ["pl-0123456789abcdef0"],
            "VpceIds": ["vpce-0123456789abcdef0"],
        })
    );

    let saml = &properties["SamlConfiguration"];
    assert_eq!(saml["IdpMetadata"]["Url"], "https://idp.example.com/metadata.xml");
    assert_eq!(saml["LoginValidityDuration"], 120.0);
    assert_eq!(saml["AssertionAttributes"]["Email"], "mail");
    assert_eq!(saml["RoleValues"]["Editor"], json!(["grafana-editors"]));
    assert!(saml.get("idpMetadata").is_none());
}
