//! Tests for the configuration loader: defaults, file discovery, and
//! environment overrides. Environment mutation forces serial execution.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use companion_config::load;

const ENV_VARS_TO_RESET: &[&str] = &[
    "COMPANION_CONFIG",
    "COMPANION__HTTP__ADDRESS",
    "COMPANION__HTTP__PORT",
    "COMPANION__DATABASE__URL",
    "COMPANION__DATABASE__MAX_CONNECTIONS",
    "COMPANION__AUTH__SESSION_TTL_SECONDS",
    "COMPANION__RESPONDER__REPLY_DELAY_MS",
    "COMPANION__RESPONDER__IMAGE_DELAY_MS",
];

fn reset_environment() {
    for key in ENV_VARS_TO_RESET {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn defaults_apply_without_file_or_environment() {
    reset_environment();

    let config = load().expect("defaults should load");

    assert_eq!(config.http.address, "127.0.0.1");
    assert_eq!(config.http.port, 7080);
    assert_eq!(config.database.url, "sqlite://companion.db");
    assert_eq!(config.database.max_connections, 10);
    assert_eq!(config.auth.session_ttl_seconds, 86_400);
    assert_eq!(config.responder.reply_delay_ms, 1_000);
    assert_eq!(config.responder.image_delay_ms, 2_000);
}

#[test]
#[serial]
fn environment_overrides_take_precedence() {
    reset_environment();

    std::env::set_var("COMPANION__HTTP__PORT", "9191");
    std::env::set_var("COMPANION__RESPONDER__REPLY_DELAY_MS", "0");

    let config = load().expect("environment overrides should load");
    assert_eq!(config.http.port, 9191);
    assert_eq!(config.responder.reply_delay_ms, 0);

    reset_environment();
}

#[test]
#[serial]
fn explicit_config_file_is_honoured() {
    reset_environment();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("companion.toml");
    fs::write(
        &path,
        r#"
[http]
address = "0.0.0.0"
port = 8088

[database]
url = "sqlite://from-file.db"
"#,
    )
    .unwrap();

    std::env::set_var("COMPANION_CONFIG", &path);

    let config = load().expect("file-based configuration should load");
    assert_eq!(config.http.address, "0.0.0.0");
    assert_eq!(config.http.port, 8088);
    assert_eq!(config.database.url, "sqlite://from-file.db");
    // Sections absent from the file fall back to defaults.
    assert_eq!(config.auth.session_ttl_seconds, 86_400);

    reset_environment();
}
