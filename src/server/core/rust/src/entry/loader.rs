/* src/server/core/rust/src/entry/loader.rs */

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use crate::app::AppId;
use crate::config::RenderMode;
use crate::errors::LoadError;

use super::manifest::EntryManifest;
use super::module::{EntryModule, Tier};
use super::template_module::{Build, build_entry};

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

pub const SOURCE_ENTRY: &str = "entry-server.toml";
pub const COMPILED_ENTRY: &str = "entry-server.json";

/// One strategy for producing an app's entry module.
pub trait EntryLoader: Send + Sync {
  fn tier(&self) -> Tier;

  /// File this loader would read for `app`, if it reads one.
  fn path(&self, app: &AppId) -> Option<PathBuf>;

  fn load(&self, app: &AppId) -> BoxFuture<Result<Arc<dyn EntryModule>, LoadError>>;

  /// Whether a successful load may be reused for later requests.
  fn cacheable(&self) -> bool {
    false
  }
}

fn entry_path(root: &Path, app: &AppId, file: &str) -> PathBuf {
  root.join("apps").join(app.as_str()).join("src").join(file)
}

async fn read_manifest(
  path: &Path,
  parse: fn(&str) -> Result<EntryManifest, String>,
) -> Result<EntryManifest, LoadError> {
  let raw = tokio::fs::read_to_string(path).await.map_err(|e| LoadError::from_io(path.to_path_buf(), e))?;
  parse(&raw).map_err(|message| LoadError::Parse { path: path.to_path_buf(), message })
}

fn parse_toml(raw: &str) -> Result<EntryManifest, String> {
  toml::from_str(raw).map_err(|e| e.to_string())
}

fn parse_json(raw: &str) -> Result<EntryManifest, String> {
  serde_json::from_str(raw).map_err(|e| e.to_string())
}

/// Development only: the source manifest with layouts composed and every
/// template checked. Reloaded on each request.
pub struct TransformingSourceLoader {
  source_root: PathBuf,
  mode: RenderMode,
}

impl TransformingSourceLoader {
  pub fn new(source_root: impl Into<PathBuf>, mode: RenderMode) -> Self {
    Self { source_root: source_root.into(), mode }
  }
}

impl EntryLoader for TransformingSourceLoader {
  fn tier(&self) -> Tier {
    Tier::Source
  }

  fn path(&self, app: &AppId) -> Option<PathBuf> {
    Some(entry_path(&self.source_root, app, SOURCE_ENTRY))
  }

  fn load(&self, app: &AppId) -> BoxFuture<Result<Arc<dyn EntryModule>, LoadError>> {
    let enabled = self.mode.is_development();
    let path = entry_path(&self.source_root, app, SOURCE_ENTRY);
    Box::pin(async move {
      if !enabled {
        return Err(LoadError::Disabled);
      }
      let manifest = read_manifest(&path, parse_toml).await?;
      let entry = build_entry(&path, manifest, Build::Checked).await?;
      Ok(Arc::new(entry) as Arc<dyn EntryModule>)
    })
  }
}

/// Build output: `<dist_root>/apps/<app>/src/entry-server.json`.
pub struct CompiledLoader {
  dist_root: PathBuf,
}

impl CompiledLoader {
  pub fn new(dist_root: impl Into<PathBuf>) -> Self {
    Self { dist_root: dist_root.into() }
  }
}

impl EntryLoader for CompiledLoader {
  fn tier(&self) -> Tier {
    Tier::Compiled
  }

  fn path(&self, app: &AppId) -> Option<PathBuf> {
    Some(entry_path(&self.dist_root, app, COMPILED_ENTRY))
  }

  fn load(&self, app: &AppId) -> BoxFuture<Result<Arc<dyn EntryModule>, LoadError>> {
    let path = entry_path(&self.dist_root, app, COMPILED_ENTRY);
    Box::pin(async move {
      let manifest = read_manifest(&path, parse_json).await?;
      let entry = build_entry(&path, manifest, Build::Checked).await?;
      Ok(Arc::new(entry) as Arc<dyn EntryModule>)
    })
  }

  fn cacheable(&self) -> bool {
    true
  }
}

/// The source manifest used as-is: no layouts, lenient templates.
pub struct RawSourceLoader {
  source_root: PathBuf,
}

impl RawSourceLoader {
  pub fn new(source_root: impl Into<PathBuf>) -> Self {
    Self { source_root: source_root.into() }
  }
}

impl EntryLoader for RawSourceLoader {
  fn tier(&self) -> Tier {
    Tier::Raw
  }

  fn path(&self, app: &AppId) -> Option<PathBuf> {
    Some(entry_path(&self.source_root, app, SOURCE_ENTRY))
  }

  fn load(&self, app: &AppId) -> BoxFuture<Result<Arc<dyn EntryModule>, LoadError>> {
    let path = entry_path(&self.source_root, app, SOURCE_ENTRY);
    Box::pin(async move {
      let manifest = read_manifest(&path, parse_toml).await?;
      let entry = build_entry(&path, manifest, Build::Verbatim).await?;
      Ok(Arc::new(entry) as Arc<dyn EntryModule>)
    })
  }
}
