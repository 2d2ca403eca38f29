use std::path::Path;

use chainconsole::config::{ConfigError, ConsoleConfig};
use chainconsole::constants::{DEFAULT_NODE_CONFIG, DEFAULT_PORT};
use chainconsole::events::LogLevel;
use chainconsole::node::{KeyError, SecretKey};

#[test]
fn empty_file_uses_defaults() {
    let cfg = ConsoleConfig::from_toml_str("", Path::new("console.toml")).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.node_config, DEFAULT_NODE_CONFIG);
    assert_eq!(cfg.bind_addr(), format!("127.0.0.1:{}", DEFAULT_PORT));
    assert!(cfg.signing_key().unwrap().is_none());
}

#[test]
fn full_file_is_parsed() {
    let key = "11".repeat(32);
    let toml = format!(
        r#"
listen_addr = "0.0.0.0"
port = 30999
node_config = "/etc/node/config.ini"
signing_key = "0x{key}"
app_name = "ops-console"

[logging]
json_path = "/var/log/console.jsonl"
json_rotate = 5
console_level = "warn"
"#
    );
    let cfg = ConsoleConfig::from_toml_str(&toml, Path::new("console.toml")).unwrap();
    assert_eq!(cfg.bind_addr(), "0.0.0.0:30999");
    assert_eq!(cfg.node_config, "/etc/node/config.ini");
    assert_eq!(cfg.app_name.as_deref(), Some("ops-console"));
    let logging = cfg.logging.as_ref().unwrap();
    assert_eq!(logging.json_rotate, Some(5));
    assert_eq!(logging.console_level, Some(LogLevel::Warn));
    let key = cfg.signing_key().unwrap().unwrap();
    assert_eq!(key.as_bytes(), &[0x11u8; 32]);
}

#[test]
fn malformed_key_is_rejected() {
    let cfg =
        ConsoleConfig::from_toml_str("signing_key = \"abcd\"", Path::new("console.toml")).unwrap();
    assert!(matches!(
        cfg.signing_key(),
        Err(ConfigError::SigningKey(KeyError::Length(2)))
    ));

    let cfg =
        ConsoleConfig::from_toml_str("signing_key = \"zz\"", Path::new("console.toml")).unwrap();
    assert!(matches!(
        cfg.signing_key(),
        Err(ConfigError::SigningKey(KeyError::Hex(_)))
    ));
}

#[test]
fn parse_and_read_errors_name_the_file() {
    let err = ConsoleConfig::from_toml_str("port = \"high\"", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("bad.toml"));

    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("missing.toml");
    assert!(matches!(
        ConsoleConfig::load(&missing),
        Err(ConfigError::Read { .. })
    ));

    let present = tmp.path().join("console.toml");
    std::fs::write(&present, "port = 1234\n").unwrap();
    assert_eq!(ConsoleConfig::load(&present).unwrap().port, 1234);
}

#[test]
fn ephemeral_keys_differ() {
    let a = SecretKey::ephemeral();
    let b = SecretKey::ephemeral();
    assert_ne!(a, b);
    assert_ne!(a.as_bytes(), &[0u8; 32]);
    assert_eq!(format!("{:?}", a), "SecretKey(<redacted>)");
}
