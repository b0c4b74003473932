/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use isomorph_server::{AppRoutes, RenderMode};

use super::IsomorphConfig;

pub const CONFIG_FILE: &str = "isomorph.toml";

/// Walk upward from `start` to find `isomorph.toml`, like Cargo.toml discovery
pub fn find_isomorph_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_isomorph_config(path: &Path) -> Result<IsomorphConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: IsomorphConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  AppRoutes::new(&config.apps, &config.server.api_prefix)
    .with_context(|| format!("invalid [[apps]] in {}", path.display()))?;
  Ok(config)
}

/// Apply `PORT` and `ISOMORPH_ENV` from `lookup` on top of the file values.
pub fn apply_env(mut config: IsomorphConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<IsomorphConfig> {
  if let Some(port) = lookup("PORT") {
    config.server.port = port.trim().parse().with_context(|| format!("invalid PORT \"{port}\""))?;
  }
  if let Some(mode) = lookup("ISOMORPH_ENV") {
    config.render.mode = mode.parse::<RenderMode>().map_err(anyhow::Error::msg).context("invalid ISOMORPH_ENV")?;
  }
  Ok(config)
}

/// Explicit path, else discovery from `cwd`, else built-in defaults rooted
/// at `cwd`. Returns the directory relative roots resolve against.
pub fn resolve_config(explicit: Option<PathBuf>, cwd: &Path) -> Result<(PathBuf, IsomorphConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => match find_isomorph_config(cwd) {
      Ok(p) => p,
      Err(_) => {
        tracing::info!("no {CONFIG_FILE} found, using defaults");
        return Ok((cwd.to_path_buf(), IsomorphConfig::default()));
      }
    },
  };
  let config = load_isomorph_config(&path)?;
  let base = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
  Ok((base, config))
}
