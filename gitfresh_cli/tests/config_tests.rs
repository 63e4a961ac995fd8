//! Tests for the layered configuration manager
//!
//! Every test works on a config file inside its own temporary directory.

use gitfresh_cli::config::ConfigManager;
use gitfresh_core::SyncOptions;
use std::fs;
use tempfile::TempDir;

fn create_test_config_manager(temp_dir: &TempDir) -> ConfigManager {
    let config_path = temp_dir.path().join("config.toml");
    ConfigManager::with_path(config_path)
}

#[test]
fn test_defaults_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config_manager(&temp_dir).load().unwrap();

    assert_eq!(config.github.api_url, "https://api.github.com/users/");
    assert_eq!(
        config.freshdesk.api_url,
        "https://{subdomain}.freshdesk.com/api/v2/"
    );
    assert_eq!(config.freshdesk.timeout_seconds, 30);
    assert_eq!(config.output.default_format, "human");
    assert!(config.output.color_enabled);
    assert!(!config.sync.serialize_creations);
}

#[test]
fn test_set_and_get_default_subdomain() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager
        .set("freshdesk.default_subdomain", "acme")
        .unwrap();

    assert!(temp_dir.path().join("config.toml").exists());
    assert_eq!(
        config_manager.get("freshdesk.default_subdomain").unwrap(),
        "acme"
    );
    let config = config_manager.load().unwrap();
    assert_eq!(config.freshdesk.default_subdomain.as_deref(), Some("acme"));
}

#[test]
fn test_invalid_subdomain_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    assert!(
        config_manager
            .set("freshdesk.default_subdomain", "acme.evil.com/")
            .is_err()
    );
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_timeout_must_be_positive() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    assert!(config_manager.set("github.timeout_seconds", "0").is_err());
    assert!(config_manager.set("github.timeout_seconds", "soon").is_err());

    config_manager.set("github.timeout_seconds", "5").unwrap();
    assert_eq!(config_manager.load().unwrap().github.timeout_seconds, 5);
}

#[test]
fn test_api_url_validation() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    assert!(config_manager.set("freshdesk.api_url", "not a url").is_err());
    config_manager
        .set("freshdesk.api_url", "https://{subdomain}.example.test/api/v2/")
        .unwrap();
    assert_eq!(
        config_manager.get("freshdesk.api_url").unwrap(),
        "https://{subdomain}.example.test/api/v2/"
    );
}

#[test]
fn test_output_format_validation() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    assert!(config_manager.set("output.default_format", "csv").is_err());
    config_manager.set("output.default_format", "json").unwrap();
    assert_eq!(config_manager.get("output.default_format").unwrap(), "json");
}

#[test]
fn test_secrets_are_masked_but_stored() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager.set("freshdesk.api_key", "abcdef").unwrap();

    assert_eq!(config_manager.get("freshdesk.api_key").unwrap(), "******");
    let listed = config_manager.list().unwrap();
    let (_, shown) = listed
        .iter()
        .find(|(key, _)| key == "freshdesk.api_key")
        .unwrap();
    assert_eq!(shown, "******");

    let config = config_manager.load().unwrap();
    assert_eq!(config.freshdesk.api_key.expose_secret(), "abcdef");
}

#[test]
fn test_serialize_creations_flows_into_sync_options() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    assert!(config_manager.set("sync.serialize_creations", "yes").is_err());
    config_manager.set("sync.serialize_creations", "true").unwrap();

    let config = config_manager.load().unwrap();
    let options = SyncOptions::from(&config.sync);
    assert!(options.serialize_creations);
}

#[test]
fn test_set_preserves_other_keys() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager
        .set("freshdesk.default_subdomain", "acme")
        .unwrap();
    config_manager.set("output.color_enabled", "false").unwrap();

    let content = fs::read_to_string(config_manager.get_config_path()).unwrap();
    assert!(content.contains("default_subdomain = \"acme\""));
    assert!(content.contains("color_enabled = false"));
}

#[test]
fn test_unknown_key_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let config_manager = create_test_config_manager(&temp_dir);

    assert!(config_manager.get("freshdesk.nope").is_err());
}
