use std::collections::HashMap;

use crate::{ArcPath, ArcStr, env::Env, log::LogLevel};

use super::{Config, Data, PathOpt, StrOpt, USizeOpt, core};

fn write_config(contents: &str) -> (tempfile::TempDir, ArcPath) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    (dir, ArcPath::from(path))
}

#[test]
fn test_default_values() {
    let data = Data::default();
    assert_eq!(data.port(), 3000);
    assert_eq!(&*data.str(StrOpt::Upstream), "https://www.youtube.com");
    assert_eq!(data.usize(USizeOpt::CacheDuration), 3600);
    assert_eq!(data.usize(USizeOpt::Timeout), 0);
    assert_eq!(data.usize(USizeOpt::MaxAge), 0);
    assert_eq!(data.log_level(), LogLevel::Info);
    assert_eq!(data.path(PathOpt::LogDir), None);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let data: Data = toml::from_str("port = 8080\nlog_level = \"warn\"\n").unwrap();
    assert_eq!(data.port(), 8080);
    assert_eq!(data.log_level(), LogLevel::Warning);
    assert_eq!(data.usize(USizeOpt::CacheDuration), 3600);
}

#[test]
fn test_sample_config_parses() {
    let sample = include_str!("../../samples/config.toml");
    let data: Data = toml::from_str(sample).unwrap();
    assert_eq!(data.port(), 3000);
    assert_eq!(data.log_level(), LogLevel::Info);
    assert_eq!(
        data.path(PathOpt::LogDir),
        Some(ArcPath::from("/tmp/ytrss/logs"))
    );
    assert_eq!(data.usize(USizeOpt::CacheDuration), 3600);
}

#[test]
fn test_serialization_round_trip() {
    let data: Data = toml::from_str("log_dir = \"/var/log/ytrss\"\ntimeout = 10\n").unwrap();
    assert_ne!(data, Data::default());
    let text = toml::to_string_pretty(&data).unwrap();
    let parsed: Data = toml::from_str(&text).unwrap();
    assert_eq!(parsed, data);
}

#[tokio::test]
async fn test_read_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = ArcPath::from(dir.path().join("absent.toml"));
    let data = core::read_file(&path).await.unwrap();
    assert_eq!(data, Data::default());
}

#[tokio::test]
async fn test_read_invalid_file_fails() {
    let (_dir, path) = write_config("port = \"not a number\"");
    assert!(core::read_file(&path).await.is_err());
}

#[tokio::test]
async fn test_load_file_then_env_overrides() {
    let (_dir, path) = write_config(
        r#"
port = 8080
upstream = "http://localhost:9000"
cache_duration = 60
log_level = "error"
"#,
    );
    let env = Env::mock(HashMap::from([
        (ArcStr::from(super::PORT_VAR), ArcStr::from("9090")),
        (ArcStr::from(super::LOG_LEVEL_VAR), ArcStr::from("warn")),
    ]));

    let config = Config::spawn(env, path);
    assert!(matches!(config, Config::Actual(_)));
    config.load().await.unwrap();

    assert_eq!(config.port().await.unwrap(), 9090);
    assert_eq!(config.log_level().await.unwrap(), LogLevel::Warning);
    assert_eq!(
        &*config.str(StrOpt::Upstream).await.unwrap(),
        "http://localhost:9000"
    );
    assert_eq!(config.usize(USizeOpt::CacheDuration).await.unwrap(), 60);
}

#[tokio::test]
async fn test_load_rejects_invalid_port() {
    let dir = tempfile::tempdir().unwrap();
    let env = Env::mock(HashMap::from([(
        ArcStr::from(super::PORT_VAR),
        ArcStr::from("eighty"),
    )]));

    let config = Config::spawn(env, ArcPath::from(dir.path().join("config.toml")));
    assert!(config.load().await.is_err());
    assert_eq!(config.port().await.unwrap(), 3000);
}

#[tokio::test]
async fn test_port_flag_overrides_loaded_port() {
    let (_dir, path) = write_config("port = 8080\n");
    let env = Env::mock(HashMap::from([(
        ArcStr::from(super::PORT_VAR),
        ArcStr::from("9090"),
    )]));
    let config = Config::spawn(env, path);
    config.load().await.unwrap();
    assert_eq!(config.port().await.unwrap(), 9090);

    config.set_port(4000).await.unwrap();
    assert_eq!(config.port().await.unwrap(), 4000);
    assert_eq!(config.path(PathOpt::LogDir).await.unwrap(), None);
}

#[tokio::test]
async fn test_mock_config() {
    let data: Data = toml::from_str("max_age = 7\nlog_level = \"error\"\n").unwrap();
    let config = Config::mock(data);
    assert!(matches!(config, Config::Mock(_)));

    assert!(config.load().await.is_ok());
    assert_eq!(config.usize(USizeOpt::MaxAge).await.unwrap(), 7);
    assert_eq!(config.log_level().await.unwrap(), LogLevel::Error);
    assert_eq!(
        &*config.str(StrOpt::Upstream).await.unwrap(),
        "https://www.youtube.com"
    );

    config.set_port(4000).await.unwrap();
    assert_eq!(config.port().await.unwrap(), 4000);
}
