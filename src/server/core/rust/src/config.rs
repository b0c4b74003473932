/* src/server/core/rust/src/config.rs */

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
  /// Source entries are transformed on every request and win over build output.
  #[default]
  Development,
  Production,
}

impl RenderMode {
  pub fn is_development(self) -> bool {
    self == Self::Development
  }
}

impl FromStr for RenderMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "development" | "dev" => Ok(Self::Development),
      "production" | "prod" => Ok(Self::Production),
      other => Err(format!("unknown render mode \"{other}\" (expected development or production)")),
    }
  }
}

/// Where build output and sources live, and how to treat them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
  pub mode: RenderMode,
  pub dist_root: PathBuf,
  pub source_root: PathBuf,
  /// `id` of the element markup is spliced into.
  pub mount_id: String,
}

impl Default for RenderConfig {
  fn default() -> Self {
    Self {
      mode: RenderMode::default(),
      dist_root: PathBuf::from("dist"),
      source_root: PathBuf::from("."),
      mount_id: "root".to_string(),
    }
  }
}

impl RenderConfig {
  /// Anchor relative roots at `base` (normally the config file's directory).
  pub fn rooted_at(mut self, base: &Path) -> Self {
    if self.dist_root.is_relative() {
      self.dist_root = base.join(&self.dist_root);
    }
    if self.source_root.is_relative() {
      self.source_root = base.join(&self.source_root);
    }
    self
  }

  pub fn app_dist_dir(&self, app: &str) -> PathBuf {
    self.dist_root.join("apps").join(app)
  }

  pub fn app_source_dir(&self, app: &str) -> PathBuf {
    self.source_root.join("apps").join(app)
  }
}
