/* src/server/core/rust/src/errors.rs */

use std::fmt;
use std::path::PathBuf;

use isomorph_injector::TemplateError;

use crate::app::AppId;
use crate::entry::Tier;

/// Why a single loader tier produced no entry module.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  #[error("{} does not exist", .path.display())]
  NotFound { path: PathBuf },
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to parse {}: {message}", .path.display())]
  Parse { path: PathBuf, message: String },
  #[error("failed to transform {}: {message}", .path.display())]
  Transform { path: PathBuf, message: String },
  #[error("invalid template {}: {source}", .path.display())]
  Template {
    path: PathBuf,
    #[source]
    source: TemplateError,
  },
  #[error("tier disabled in this render mode")]
  Disabled,
  #[error("no in-process entry registered for {app}")]
  NotRegistered { app: AppId },
}

impl LoadError {
  /// Map a read failure, folding `NotFound` into its own variant.
  pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
    if source.kind() == std::io::ErrorKind::NotFound {
      Self::NotFound { path }
    } else {
      Self::Io { path, source }
    }
  }
}

#[derive(Debug)]
pub struct Attempt {
  pub tier: Tier,
  pub path: Option<PathBuf>,
  pub reason: LoadError,
}

/// Every tier failed for `app`.
#[derive(Debug)]
pub struct ResolutionError {
  pub app: AppId,
  pub attempts: Vec<Attempt>,
}

impl fmt::Display for ResolutionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "no entry module for {}", self.app)?;
    for a in &self.attempts {
      match &a.path {
        Some(path) => write!(f, "; {} ({}): {}", a.tier, path.display(), a.reason)?,
        None => write!(f, "; {}: {}", a.tier, a.reason)?,
      }
    }
    Ok(())
  }
}

impl std::error::Error for ResolutionError {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderInvocationError {
  #[error("no route matches {url}")]
  NoRoute { url: String },
  #[error("render failed: {0}")]
  Failed(String),
  #[error("render panicked: {0}")]
  Panicked(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateReadError {
  #[error("failed to read template {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("template {} has {found} mount points, expected exactly one", .path.display())]
  MountPoint { path: PathBuf, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
  #[error("invalid app id {0:?}: expected lower kebab-case")]
  InvalidAppId(String),
  #[error("app {0} declared more than once")]
  DuplicateApp(String),
  #[error("path prefix {0:?} used by more than one app")]
  DuplicatePrefix(String),
  #[error("invalid path prefix {0:?}: expected a single path segment")]
  InvalidPrefix(String),
  #[error("expected exactly one app without a prefix, found {found}")]
  DefaultApp { found: usize },
}
