//! Workspace configuration validation
//!
//! Each constrained field has its own pure check returning a
//! [`ValidationError`] on violation. [`Validator`] runs every check whose
//! field is present and collects ALL errors (doesn't stop at first), along
//! with warnings that do not block the configuration.
//!
//! Deferred references are never inspected; only literals are checked.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::schema::{
    AuthenticationProvider, Deferred, PermissionType, SamlConfiguration, WorkspaceConfiguration,
};
use crate::error::{Rule, ValidationError, ValidationErrors, ValidationWarning};

// ============================================================================
// Constraint Tables
// ============================================================================

/// Pattern a `clientToken` must match: 1-64 characters from `!` to `~`.
pub const CLIENT_TOKEN_PATTERN: &str = r"^[!-~]{1,64}$";

/// Pattern a `name` must match.
pub const NAME_PATTERN: &str = r"^[a-zA-Z0-9\-._~]{1,255}$";

/// Maximum `description` length in characters.
pub const DESCRIPTION_MAX_LENGTH: usize = 2048;

/// Account access types documented by the managed service.
pub const KNOWN_ACCOUNT_ACCESS_TYPES: [&str; 2] = ["CURRENT_ACCOUNT", "ORGANIZATION"];

static CLIENT_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CLIENT_TOKEN_PATTERN).expect("valid regex"));

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NAME_PATTERN).expect("valid regex"));

// ============================================================================
// Field Checks
// ============================================================================

/// Checks a `clientToken` value.
///
/// # Errors
///
/// Returns [`Rule::ClientTokenFormat`] unless the token is 1-64 characters,
/// each in `0x21..=0x7E`.
pub fn check_client_token(client_token: &str) -> Result<(), ValidationError> {
    if CLIENT_TOKEN_RE.is_match(client_token) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "clientToken",
            client_token,
            Rule::ClientTokenFormat,
        ))
    }
}

/// Checks that `dataSources` is only populated for service-managed
/// workspaces.
///
/// An empty list is accepted under either permission type.
///
/// # Errors
///
/// Returns [`Rule::DataSourcesRequireServiceManaged`] when `data_sources`
/// is non-empty and `permission_type` is `CUSTOMER_MANAGED`.
pub fn check_data_sources(
    data_sources: &[String],
    permission_type: PermissionType,
) -> Result<(), ValidationError> {
    if permission_type == PermissionType::CustomerManaged && !data_sources.is_empty() {
        return Err(ValidationError::new(
            "dataSources",
            format!("[{}]", data_sources.join(", ")),
            Rule::DataSourcesRequireServiceManaged,
        ));
    }
    Ok(())
}

/// Checks a `description` value.
///
/// # Errors
///
/// Returns [`Rule::DescriptionLength`] carrying the observed length when
/// the description is longer than [`DESCRIPTION_MAX_LENGTH`] characters.
pub fn check_description(description: &str) -> Result<(), ValidationError> {
    let length = description.chars().count();
    if length > DESCRIPTION_MAX_LENGTH {
        return Err(ValidationError::new(
            "description",
            length.to_string(),
            Rule::DescriptionLength,
        ));
    }
    Ok(())
}

/// Checks a `name` value.
///
/// # Errors
///
/// Returns [`Rule::NameFormat`] unless the name is 1-255 characters from
/// `[A-Za-z0-9-._~]`.
pub fn check_name(name: &str) -> Result<(), ValidationError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::new("name", name, Rule::NameFormat))
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Rule violations (prevent mapping).
    pub errors: Vec<ValidationError>,

    /// Informational warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts into the warnings on success or the collected errors on
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns every collected error when at least one was found.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ValidationErrors> {
        match ValidationErrors::new(self.errors) {
            Some(errors) => Err(errors),
            None => Ok(self.warnings),
        }
    }
}

/// Validates a configuration with a fresh [`Validator`].
#[must_use]
pub fn validate(config: &WorkspaceConfiguration) -> ValidationResult {
    Validator::new().validate(config)
}

/// Configuration validator.
///
/// Runs every field check and semantic check against a
/// `WorkspaceConfiguration`, collecting the union of violations.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns the result.
    ///
    /// Absent optional fields are always valid. The configuration is
    /// never modified.
    pub fn validate(&mut self, config: &WorkspaceConfiguration) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_required(config);
        self.validate_fields(config);
        self.validate_account_access(config);
        self.validate_authentication(config);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Required Fields
    // ========================================================================

    fn validate_required(&mut self, config: &WorkspaceConfiguration) {
        if config.account_access_type.is_empty() {
            self.errors.push(ValidationError::new(
                "accountAccessType",
                "\"\"",
                Rule::Required,
            ));
        }

        if config.authentication_providers.is_empty() {
            self.errors.push(ValidationError::new(
                "authenticationProviders",
                "[]",
                Rule::Required,
            ));
        }
    }

    // ========================================================================
    // Constrained Fields
    // ========================================================================

    fn validate_fields(&mut self, config: &WorkspaceConfiguration) {
        let checks = [
            config.client_token.as_deref().map(check_client_token),
            config
                .data_sources
                .as_deref()
                .map(|ds| check_data_sources(ds, config.permission_type)),
            config.description.as_deref().map(check_description),
            config.name.as_deref().map(check_name),
        ];

        self.errors
            .extend(checks.into_iter().flatten().filter_map(Result::err));
    }

    // ========================================================================
    // Semantic Warnings
    // ========================================================================

    fn validate_account_access(&mut self, config: &WorkspaceConfiguration) {
        let access = config.account_access_type.as_str();
        if access.is_empty() {
            return;
        }

        if !KNOWN_ACCOUNT_ACCESS_TYPES.contains(&access) {
            self.add_warning(
                "accountAccessType",
                &format!(
                    "Unrecognized account access type '{access}'. Known values: {}",
                    KNOWN_ACCOUNT_ACCESS_TYPES.join(", ")
                ),
            );
        }

        let has_units = config
            .organizational_units
            .as_ref()
            .is_some_and(|units| !units.is_empty());
        if has_units && access != "ORGANIZATION" {
            self.add_warning(
                "organizationalUnits",
                "organizationalUnits is only used when accountAccessType is ORGANIZATION",
            );
        }
    }

    fn validate_authentication(&mut self, config: &WorkspaceConfiguration) {
        let mut seen = HashSet::new();
        for provider in &config.authentication_providers {
            if !seen.insert(provider) {
                self.add_warning(
                    "authenticationProviders",
                    &format!("Duplicate authentication provider: '{provider}'"),
                );
            }
        }

        if seen.contains(&AuthenticationProvider::Saml) && config.saml_configuration.is_none() {
            self.add_warning(
                "samlConfiguration",
                "SAML is listed as an authentication provider but samlConfiguration is not set",
            );
        }

        if let Some(Deferred::Literal(saml)) = &config.saml_configuration {
            self.validate_saml(saml);
        }
    }

    fn validate_saml(&mut self, saml: &SamlConfiguration) {
        if let Deferred::Literal(metadata) = &saml.idp_metadata {
            if metadata.url.is_none() && metadata.xml.is_none() {
                self.add_warning(
                    "samlConfiguration.idpMetadata",
                    "Neither url nor xml is set; the identity provider cannot be reached",
                );
            }
        }
    }

    fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{IdpMetadata, ReferenceHandle};

    fn minimal_config() -> WorkspaceConfiguration {
        WorkspaceConfiguration::new(
            "CURRENT_ACCOUNT",
            vec![AuthenticationProvider::AwsSso],
            PermissionType::ServiceManaged,
        )
    }

    #[test]
    fn test_validate_minimal_config() {
        let result = validate(&minimal_config());
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_client_token_examples() {
        assert!(check_client_token("abc123").is_ok());
        assert!(check_client_token("").is_err());
        assert!(check_client_token(&"!".repeat(64)).is_ok());
        assert!(check_client_token(&"!".repeat(65)).is_err());
        assert!(check_client_token("abc 123").is_err());
        assert!(check_client_token("tab\there").is_err());
        assert!(check_client_token("caf\u{e9}").is_err());
    }

    #[test]
    fn test_client_token_error_carries_value() {
        let err = check_client_token("has space").unwrap_err();
        assert_eq!(err.field, "clientToken");
        assert_eq!(err.value, "has space");
        assert_eq!(err.rule, Rule::ClientTokenFormat);
    }

    #[test]
    fn test_client_token_rejects_trailing_newline() {
        assert!(check_client_token("abc\n").is_err());
    }

    #[test]
    fn test_name_examples() {
        assert!(check_name("my-workspace_1").is_ok());
        assert!(check_name("a.b~c").is_ok());
        assert!(check_name("my workspace").is_err());
        assert!(check_name("").is_err());
        assert!(check_name(&"n".repeat(255)).is_ok());
        assert!(check_name(&"n".repeat(256)).is_err());
        assert!(check_name("slash/name").is_err());
    }

    #[test]
    fn test_description_boundary() {
        assert!(check_description(&"d".repeat(2048)).is_ok());
        let err = check_description(&"d".repeat(2049)).unwrap_err();
        assert_eq!(err.value, "2049");
        assert_eq!(err.rule, Rule::DescriptionLength);
        assert!(check_description("").is_ok());
    }

    #[test]
    fn test_description_counts_characters() {
        // 2048 two-byte characters are still 2048 characters
        assert!(check_description(&"\u{e9}".repeat(2048)).is_ok());
    }

    #[test]
    fn test_data_sources_customer_managed() {
        let sources = vec!["PROMETHEUS".to_string()];
        let err = check_data_sources(&sources, PermissionType::CustomerManaged).unwrap_err();
        assert_eq!(err.field, "dataSources");
        assert_eq!(err.value, "[PROMETHEUS]");
        assert!(check_data_sources(&sources, PermissionType::ServiceManaged).is_ok());
        assert!(check_data_sources(&[], PermissionType::CustomerManaged).is_ok());
    }

    #[test]
    fn test_validate_absent_fields_are_valid() {
        let mut config = minimal_config();
        config.permission_type = PermissionType::CustomerManaged;
        assert!(validate(&config).is_valid());
    }

    #[test]
    fn test_validate_present_empty_name_rejected() {
        let mut config = minimal_config();
        config.name = Some(String::new());
        let result = validate(&config);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].rule, Rule::NameFormat);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = minimal_config();
        config.permission_type = PermissionType::CustomerManaged;
        config.client_token = Some(String::new());
        config.data_sources = Some(vec!["CLOUDWATCH".to_string()]);
        config.description = Some("x".repeat(3000));
        config.name = Some("bad name".to_string());

        let result = validate(&config);
        let rules: Vec<Rule> = result.errors.iter().map(|e| e.rule).collect();
        assert_eq!(
            rules,
            vec![
                Rule::ClientTokenFormat,
                Rule::DataSourcesRequireServiceManaged,
                Rule::DescriptionLength,
                Rule::NameFormat,
            ]
        );
    }

    #[test]
    fn test_validate_required_fields() {
        let config = WorkspaceConfiguration::new("", vec![], PermissionType::ServiceManaged);
        let errors = validate(&config).into_result().unwrap_err();
        assert!(errors.has_field("accountAccessType"));
        assert!(errors.has_field("authenticationProviders"));
        assert!(errors.iter().all(|e| e.rule == Rule::Required));
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let mut config = minimal_config();
        config.name = Some("bad name".to_string());
        let before = config.clone();
        let _ = validate(&config);
        assert_eq!(config, before);
    }

    #[test]
    fn test_validator_is_reusable() {
        let mut validator = Validator::new();
        let mut bad = minimal_config();
        bad.name = Some("bad name".to_string());
        assert!(validator.validate(&bad).has_errors());
        assert!(validator.validate(&minimal_config()).is_valid());
    }

    #[test]
    fn test_duplicate_provider_warning() {
        let mut config = minimal_config();
        config.authentication_providers =
            vec![AuthenticationProvider::AwsSso, AuthenticationProvider::AwsSso];
        let result = validate(&config);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("Duplicate"));
    }

    #[test]
    fn test_saml_without_configuration_warning() {
        let mut config = minimal_config();
        config.authentication_providers = vec![AuthenticationProvider::Saml];
        let result = validate(&config);
        assert!(result.is_valid());
        assert_eq!(result.warnings[0].field, "samlConfiguration");
    }

    #[test]
    fn test_empty_idp_metadata_is_warning_not_error() {
        let mut config = minimal_config();
        config.authentication_providers = vec![AuthenticationProvider::Saml];
        config.saml_configuration = Some(Deferred::Literal(SamlConfiguration::new(
            IdpMetadata::default(),
        )));
        let result = validate(&config);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, "samlConfiguration.idpMetadata");
    }

    #[test]
    fn test_deferred_saml_not_inspected() {
        let mut config = minimal_config();
        config.authentication_providers = vec![AuthenticationProvider::Saml];
        config.saml_configuration = Some(Deferred::Reference(ReferenceHandle::new("Saml")));
        let result = validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unknown_account_access_warning() {
        let mut config = minimal_config();
        config.account_access_type = "accountAccessType".to_string();
        let result = validate(&config);
        assert!(result.is_valid());
        assert_eq!(result.warnings[0].field, "accountAccessType");
    }

    #[test]
    fn test_organizational_units_outside_organization_warning() {
        let mut config = minimal_config();
        config.organizational_units = Some(vec!["ou-1".to_string()]);
        let result = validate(&config);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, "organizationalUnits");

        config.account_access_type = "ORGANIZATION".to_string();
        assert!(validate(&config).warnings.is_empty());
    }
}
