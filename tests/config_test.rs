//! Tests for config loading from files and the environment

use athletics_mcp::config::Config;
use serial_test::serial;
use std::io::Write;
use std::path::Path;

const ENV_VARS: &[&str] = &[
    "ATHLETICS_BASE_URL",
    "ATHLETICS_NAVIGATION_TIMEOUT",
    "ATHLETICS_NEWS_GRACE_MS",
    "ATHLETICS_SPORTS",
    "ATHLETICS_SUMMARY_SPORTS",
    "ATHLETICS_BIND_ADDRESS",
    "ATHLETICS_ENABLE_CORS",
    "ATHLETICS_LOG_FORMAT",
    "PORT",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_config_file_exists() {
    assert!(
        Path::new("config.toml").exists(),
        "config.toml should exist in project root"
    );
}

#[test]
fn test_shipped_config_matches_defaults() {
    let config = Config::from_file(Path::new("config.toml")).expect("config.toml should parse");
    let defaults = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.site.base_url, defaults.site.base_url);
    assert_eq!(config.sports.available, defaults.sports.available);
    assert_eq!(config.sports.summary, defaults.sports.summary);
    assert_eq!(config.server.bind_address, defaults.server.bind_address);
}

#[test]
fn test_from_file_with_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[site]
base_url = "http://localhost:8080"
navigation_timeout_secs = 10

[sports]
summary = ["football"]

[server]
bind_address = "127.0.0.1:4000"
enable_cors = false
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.site.base_url, "http://localhost:8080");
    assert_eq!(config.site.navigation_timeout_secs, 10);
    assert_eq!(config.site.news_grace_ms, 2000);
    assert_eq!(config.sports.summary, vec!["football"]);
    assert_eq!(config.sports.available.len(), 10);
    assert_eq!(config.server.bind_address.port(), 4000);
    assert!(!config.server.enable_cors);
}

#[test]
fn test_from_file_errors() {
    let missing = Config::from_file(Path::new("does-not-exist.toml")).unwrap_err();
    assert!(missing.to_string().contains("Failed to read config file"));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[site\nbase_url = ").unwrap();
    let invalid = Config::from_file(file.path()).unwrap_err();
    assert!(invalid.to_string().contains("Failed to parse TOML"));
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();
    let defaults = Config::default();

    assert_eq!(config.site.base_url, defaults.site.base_url);
    assert_eq!(config.server.bind_address.port(), 3000);
    assert_eq!(config.sports.summary.len(), 7);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("ATHLETICS_BASE_URL", "http://localhost:9000");
    std::env::set_var("ATHLETICS_NAVIGATION_TIMEOUT", "12");
    std::env::set_var("ATHLETICS_SPORTS", "football, baseball");
    std::env::set_var("ATHLETICS_LOG_FORMAT", "json");
    std::env::set_var("PORT", "8081");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.site.base_url, "http://localhost:9000");
    assert_eq!(config.site.navigation_timeout_secs, 12);
    assert_eq!(config.sports.available, vec!["football", "baseball"]);
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.server.bind_address.port(), 8081);
}

#[test]
#[serial]
fn test_bind_address_wins_over_port() {
    clear_env();
    std::env::set_var("ATHLETICS_BIND_ADDRESS", "127.0.0.1:7000");
    std::env::set_var("PORT", "8081");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.server.bind_address.to_string(), "127.0.0.1:7000");
}

#[test]
#[serial]
fn test_invalid_bind_address_is_an_error() {
    clear_env();
    std::env::set_var("ATHLETICS_BIND_ADDRESS", "not-an-address");

    let result = Config::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_unparsable_numbers_fall_back() {
    clear_env();
    std::env::set_var("ATHLETICS_NAVIGATION_TIMEOUT", "soon");
    std::env::set_var("PORT", "http");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.site.navigation_timeout_secs, 30);
    assert_eq!(config.server.bind_address.port(), 3000);
}
