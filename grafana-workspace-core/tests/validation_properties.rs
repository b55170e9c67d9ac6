//! Property tests for the per-field validation rules.

use grafana_workspace_core::config::validation::{
    check_client_token, check_data_sources, check_description, check_name,
};
use grafana_workspace_core::config::{
    AuthenticationProvider, PermissionType, WorkspaceConfiguration, validate,
};
use proptest::prelude::*;

fn is_printable_ascii(c: char) -> bool {
    ('!'..='~').contains(&c)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

proptest! {
    #[test]
    fn client_token_accepted_iff_printable_and_bounded(token in "\\PC{0,80}") {
        let expected = (1..=64).contains(&token.chars().count())
            && token.chars().all(is_printable_ascii);
        prop_assert_eq!(check_client_token(&token).is_ok(), expected);
    }

    #[test]
    fn client_token_printable_ascii_accepted(token in "[!-~]{1,64}") {
        prop_assert!(check_client_token(&token).is_ok());
    }

    #[test]
    fn client_token_with_space_rejected(prefix in "[!-~]{0,30}", suffix in "[!-~]{0,30}") {
        let token = format!("{prefix} {suffix}");
        prop_assert!(check_client_token(&token).is_err());
    }

    #[test]
    fn name_accepted_iff_allowed_chars_and_bounded(name in "[a-zA-Z0-9 ._~/-]{0,300}") {
        let expected = (1..=255).contains(&name.chars().count())
            && name.chars().all(is_name_char);
        prop_assert_eq!(check_name(&name).is_ok(), expected);
    }

    #[test]
    fn description_accepted_iff_within_limit(len in 0usize..4096) {
        let description = "d".repeat(len);
        prop_assert_eq!(check_description(&description).is_ok(), len <= 2048);
    }

    #[test]
    fn data_sources_rejected_only_for_customer_managed(
        sources in proptest::collection::vec("[A-Z_]{1,20}", 0..5),
        service_managed in any::<bool>(),
    ) {
        let permission = if service_managed {
            PermissionType::ServiceManaged
        } else {
            PermissionType::CustomerManaged
        };
        let expected_err = !service_managed && !sources.is_empty();
        prop_assert_eq!(check_data_sources(&sources, permission).is_err(), expected_err);
    }

    #[test]
    fn validate_reports_every_violated_field(
        bad_token in any::<bool>(),
        bad_name in any::<bool>(),
        bad_description in any::<bool>(),
    ) {
        let mut config = WorkspaceConfiguration::new(
            "CURRENT_ACCOUNT",
            vec![AuthenticationProvider::AwsSso],
            PermissionType::ServiceManaged,
        );
        config.client_token = Some(if bad_token { "a b".into() } else { "abc".into() });
        config.name = Some(if bad_name { "a b".into() } else { "ab".into() });
        config.description = Some("d".repeat(if bad_description { 2049 } else { 10 }));

        let result = validate(&config);
        let expected = usize::from(bad_token) + usize::from(bad_name) + usize::from(bad_description);
        prop_assert_eq!(result.errors.len(), expected);
    }
}

#[test]
fn documented_examples() {
    assert!(check_client_token("abc123").is_ok());
    assert!(check_client_token("").is_err());
    assert!(check_client_token(&"!".repeat(65)).is_err());
    assert!(check_client_token("a b").is_err());
    assert!(check_name("my-workspace_1").is_ok());
    assert!(check_name("my workspace").is_err());
    assert!(check_description(&"x".repeat(2048)).is_ok());
    assert!(check_description(&"x".repeat(2049)).is_err());
}
