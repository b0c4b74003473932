/* src/server/core/rust/src/entry/module.rs */

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::errors::RenderInvocationError;

/// Loader strategy an entry module came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
  InProcess,
  /// Source manifest with layouts composed and templates checked.
  Source,
  Compiled,
  /// Source manifest used as-is.
  Raw,
}

impl fmt::Display for Tier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::InProcess => "in-process",
      Self::Source => "source",
      Self::Compiled => "compiled",
      Self::Raw => "raw",
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
  pub markup: String,
  /// Static context declared by the entry, passed through untouched.
  pub context: Value,
}

/// An application's server-render entry.
pub trait EntryModule: Send + Sync + 'static {
  fn render(&self, url: &str) -> Result<Rendered, RenderInvocationError>;
}

/// Entry module handle plus where it came from.
#[derive(Clone)]
pub struct ResolvedEntry {
  module: Arc<dyn EntryModule>,
  tier: Tier,
  path: Option<PathBuf>,
}

impl ResolvedEntry {
  pub fn new(module: Arc<dyn EntryModule>, tier: Tier, path: Option<PathBuf>) -> Self {
    Self { module, tier, path }
  }

  pub fn tier(&self) -> Tier {
    self.tier
  }

  pub fn path(&self) -> Option<&Path> {
    self.path.as_deref()
  }

  pub fn render(&self, url: &str) -> Result<Rendered, RenderInvocationError> {
    self.module.render(url)
  }
}

impl fmt::Debug for ResolvedEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ResolvedEntry").field("tier", &self.tier).field("path", &self.path).finish_non_exhaustive()
  }
}
