//! Integration tests for the Akeneo API SDK.
//!
//! These tests verify end-to-end functionality of the SDK configuration system.

use akeneo_api::{
    AkeneoConfig, ClientId, ClientSecret, ConfigError, Password, ServerUrl, Username,
};

fn complete_builder() -> akeneo_api::AkeneoConfigBuilder {
    AkeneoConfig::builder()
        .server(ServerUrl::new("https://pim.example.com/").unwrap())
        .client_id(ClientId::new("client").unwrap())
        .client_secret(ClientSecret::new("secret").unwrap())
        .username(Username::new("admin").unwrap())
        .password(Password::new("admin").unwrap())
}

#[test]
fn test_full_workflow_create_newtypes_build_config_access_fields() {
    let config = complete_builder()
        .endpoints(["products", "product-models", "categories"])
        .default_locale("de_DE")
        .page_size(50)
        .user_agent_prefix("TestApp/1.0")
        .build()
        .unwrap();

    assert_eq!(config.server().as_ref(), "https://pim.example.com");
    assert_eq!(config.client_id().as_ref(), "client");
    assert_eq!(config.username().as_ref(), "admin");
    assert_eq!(config.default_locale(), "de_DE");
    assert_eq!(config.page_size(), 50);
    assert_eq!(config.user_agent_prefix(), Some("TestApp/1.0"));
    assert!(config.allows_endpoint("product-models"));
    assert!(!config.allows_endpoint("families"));
}

#[test]
fn test_multi_tenant_scenario_multiple_independent_configs() {
    let config_a = complete_builder().default_locale("en_US").build().unwrap();
    let config_b = complete_builder()
        .server(ServerUrl::new("https://other-pim.example.com").unwrap())
        .default_locale("fr_FR")
        .build()
        .unwrap();

    assert_ne!(config_a.server(), config_b.server());
    assert_eq!(config_a.default_locale(), "en_US");
    assert_eq!(config_b.default_locale(), "fr_FR");
}

#[test]
fn test_invalid_inputs_fail_fast() {
    assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
    assert!(matches!(
        ClientSecret::new(""),
        Err(ConfigError::EmptyClientSecret)
    ));
    assert!(matches!(Username::new("  "), Err(ConfigError::EmptyUsername)));
    assert!(matches!(Password::new(""), Err(ConfigError::EmptyPassword)));
    assert!(matches!(
        ServerUrl::new("pim.example.com"),
        Err(ConfigError::InvalidServerUrl { .. })
    ));
    assert!(matches!(
        complete_builder().page_size(0).build(),
        Err(ConfigError::InvalidPageSize { size: 0 })
    ));
}

#[test]
fn test_config_is_cloneable_and_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AkeneoConfig>();

    let config = complete_builder().build().unwrap();
    let cloned = config.clone();
    let handle = std::thread::spawn(move || cloned.page_size());
    assert_eq!(handle.join().unwrap(), config.page_size());
}

#[test]
fn test_secrets_are_masked_in_debug_output() {
    let config = complete_builder().build().unwrap();
    let debug = format!("{config:?}");

    assert!(debug.contains("ClientSecret(*****)"));
    assert!(debug.contains("Password(*****)"));
}
