/* src/cli/core/src/config/types.rs */

use std::path::{Path, PathBuf};

use isomorph_server::{AppSpec, RenderConfig, RenderMode};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct IsomorphConfig {
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub render: RenderSection,
  #[serde(default = "AppSpec::standard")]
  pub apps: Vec<AppSpec>,
}

impl Default for IsomorphConfig {
  fn default() -> Self {
    Self { server: ServerSection::default(), render: RenderSection::default(), apps: AppSpec::standard() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_port")]
  pub port: u16,
  #[serde(default = "default_api_prefix")]
  pub api_prefix: String,
  #[serde(default = "default_static_assets")]
  pub static_assets: bool,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { port: default_port(), api_prefix: default_api_prefix(), static_assets: default_static_assets() }
  }
}

fn default_port() -> u16 {
  3001
}

fn default_api_prefix() -> String {
  "/api".to_string()
}

fn default_static_assets() -> bool {
  true
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderSection {
  #[serde(default)]
  pub mode: RenderMode,
  #[serde(default = "default_dist_root")]
  pub dist_root: PathBuf,
  #[serde(default = "default_source_root")]
  pub source_root: PathBuf,
  #[serde(default = "default_mount_id")]
  pub mount_id: String,
}

impl Default for RenderSection {
  fn default() -> Self {
    Self {
      mode: RenderMode::default(),
      dist_root: default_dist_root(),
      source_root: default_source_root(),
      mount_id: default_mount_id(),
    }
  }
}

fn default_dist_root() -> PathBuf {
  PathBuf::from("dist")
}

fn default_source_root() -> PathBuf {
  PathBuf::from(".")
}

fn default_mount_id() -> String {
  "root".to_string()
}

impl IsomorphConfig {
  /// Render settings with relative roots anchored at `base`.
  pub fn render_config(&self, base: &Path) -> RenderConfig {
    RenderConfig {
      mode: self.render.mode,
      dist_root: self.render.dist_root.clone(),
      source_root: self.render.source_root.clone(),
      mount_id: self.render.mount_id.clone(),
    }
    .rooted_at(base)
  }
}
