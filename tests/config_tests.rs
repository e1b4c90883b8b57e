//! Tests for configuration loading.

use std::path::PathBuf;
use tempfile::TempDir;
use todolist::config::Config;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, content).expect("Failed to write config");
    path
}

#[test]
fn load_full_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
server:
  host: 0.0.0.0
  port: 8080
database:
  path: /var/lib/todolist/todo.db
  busy_timeout_ms: 250
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.path, PathBuf::from("/var/lib/todolist/todo.db"));
    assert_eq!(config.database.busy_timeout_ms, 250);
}

#[test]
fn partial_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "server:\n  port: 9000\n");

    let config = Config::load(&path).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.database.path, PathBuf::from("todolist/todo.db"));
    assert_eq!(config.database.busy_timeout_ms, 5000);
}

#[test]
fn empty_mapping_is_all_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "{}\n");

    let config = Config::load(&path).unwrap();
    assert_eq!(config.bind_addr(), "127.0.0.1:5000");
}

#[test]
fn invalid_yaml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "server: [not, a, mapping\n");

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse config file"));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::resolve(Some(&dir.path().join("nope.yaml")));
    assert!(result.is_err());
}

#[test]
fn ensure_db_dir_creates_parent() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.database.path = dir.path().join("nested").join("data").join("todo.db");

    config.ensure_db_dir().unwrap();
    assert!(dir.path().join("nested").join("data").is_dir());

    let db = config.database();
    db.ensure_schema();
    assert!(db.list_tasks().unwrap().is_empty());
}
