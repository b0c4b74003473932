/* src/cli/core/src/config/tests/parsing.rs */

use std::path::{Path, PathBuf};

use isomorph_server::{AppId, RenderMode};

use super::*;

#[test]
fn parse_empty_config_uses_defaults() {
  let config: IsomorphConfig = toml::from_str("").unwrap();
  assert_eq!(config.server.port, 3001);
  assert_eq!(config.server.api_prefix, "/api");
  assert!(config.server.static_assets);
  assert_eq!(config.render.mode, RenderMode::Development);
  assert_eq!(config.render.mount_id, "root");
  assert_eq!(config.apps.len(), 2);
  assert_eq!(config.apps[1].id, AppId::patient_portal());
}

#[test]
fn parse_full_config() {
  let toml_str = r#"
[server]
port = 8080
api_prefix = "/backend"
static_assets = false

[render]
mode = "development"
dist_root = "build"
source_root = "frontend"
mount_id = "app"

[[apps]]
id = "host"
title = "Host"

[[apps]]
id = "billing"
prefix = "billing"
"#;
  let config: IsomorphConfig = toml::from_str(toml_str).unwrap();
  assert_eq!(config.server.port, 8080);
  assert!(!config.server.static_assets);
  assert_eq!(config.render.mode, RenderMode::Development);
  assert_eq!(config.render.dist_root, PathBuf::from("build"));
  assert_eq!(config.apps[1].id.as_str(), "billing");
  assert_eq!(config.apps[1].title(), "billing");
}

#[test]
fn invalid_app_id_is_a_parse_error() {
  let err = toml::from_str::<IsomorphConfig>("[[apps]]\nid = \"Patient_Portal\"\n").unwrap_err();
  assert!(err.to_string().contains("kebab-case"));
}

#[test]
fn unknown_mode_is_a_parse_error() {
  assert!(toml::from_str::<IsomorphConfig>("[render]\nmode = \"staging\"\n").is_err());
}

#[test]
fn render_config_is_rooted() {
  let config = IsomorphConfig::default();
  let render = config.render_config(Path::new("/srv/app"));
  assert_eq!(render.dist_root, PathBuf::from("/srv/app/dist"));
  assert_eq!(render.mount_id, "root");
}

#[test]
fn env_overrides_port_and_mode() {
  let config = apply_env(IsomorphConfig::default(), |key| match key {
    "PORT" => Some("4000".into()),
    "ISOMORPH_ENV" => Some("production".into()),
    _ => None,
  })
  .unwrap();
  assert_eq!(config.server.port, 4000);
  assert_eq!(config.render.mode, RenderMode::Production);
}

#[test]
fn env_absent_keeps_file_values() {
  let config = apply_env(IsomorphConfig::default(), |_| None).unwrap();
  assert_eq!(config.server.port, 3001);
}

#[test]
fn bad_env_values_are_errors() {
  assert!(apply_env(IsomorphConfig::default(), |k| (k == "PORT").then(|| "http".to_string())).is_err());
  assert!(apply_env(IsomorphConfig::default(), |k| (k == "ISOMORPH_ENV").then(|| "qa".to_string())).is_err());
}
