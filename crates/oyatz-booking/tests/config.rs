// ABOUTME: Integration tests for loading booking configuration from TOML files.
// ABOUTME: Covers defaults, env expansion and validation failures.

use oyatz_booking::Config;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
[site]
name = "oyatz"
business_name = "OYATZ Hair"
owner_email = "owner@example.com"
phone_number = "+1234567890"

[relay]
endpoint = "https://relay.example.com/submit"
access_key = "abc-123"
timeout_secs = 5

[booking]
reset_delay_ms = 500
send_confirmation = false
fallback_on_failure = true
"#,
    );

    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config.site.phone_number, "+1234567890");
    let relay = config.relay_enabled().unwrap();
    assert_eq!(relay.endpoint, "https://relay.example.com/submit");
    assert_eq!(relay.timeout_secs, 5);
    assert_eq!(config.booking.reset_delay_ms, 500);
    assert!(!config.booking.send_confirmation);
    assert!(config.booking.fallback_on_failure);
}

#[test]
fn test_load_minimal_config_uses_defaults() {
    let file = write_config(
        r#"
[site]
owner_email = "owner@example.com"
"#,
    );

    let config = Config::load(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config.site.name, "oyatz");
    assert_eq!(config.site.business_name, "OYATZ Hair");
    assert!(config.relay.is_none());
    assert_eq!(config.booking.reset_delay_ms, 2000);
    assert!(config.booking.send_confirmation);
}

#[test]
fn test_env_expansion_in_access_key() {
    std::env::set_var("OYATZ_TEST_RELAY_KEY", "from-env");
    let file = write_config(
        r#"
[site]
owner_email = "owner@example.com"

[relay]
access_key = "${OYATZ_TEST_RELAY_KEY}"
"#,
    );

    let config = Config::load_from(file.path()).unwrap();
    let relay = config.relay_enabled().unwrap();
    assert_eq!(relay.access_key, "from-env");
    assert_eq!(relay.endpoint, "https://api.web3forms.com/submit");
}

#[test]
fn test_undefined_env_var_disables_relay() {
    let file = write_config(
        r#"
[site]
owner_email = "owner@example.com"

[relay]
access_key = "${OYATZ_TEST_UNDEFINED_KEY_9F2C}"
"#,
    );

    let config = Config::load_from(file.path()).unwrap();
    assert!(config.relay.is_some());
    assert!(config.relay_enabled().is_none());
}

#[test]
fn test_missing_owner_email_fails() {
    let file = write_config(
        r#"
[site]
name = "oyatz"
"#,
    );

    let err = Config::load_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_missing_file_fails() {
    let err = Config::load_from(std::path::Path::new("/nonexistent/oyatz/booking.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}
