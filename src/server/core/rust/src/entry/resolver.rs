/* src/server/core/rust/src/entry/resolver.rs */

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::app::AppId;
use crate::config::RenderConfig;
use crate::errors::{Attempt, LoadError, ResolutionError};

use super::loader::{CompiledLoader, EntryLoader, RawSourceLoader, TransformingSourceLoader};
use super::module::ResolvedEntry;

/// Entries from cacheable tiers, kept for the resolver's lifetime.
#[derive(Default)]
pub struct ModuleCache {
  entries: RwLock<HashMap<AppId, ResolvedEntry>>,
}

impl ModuleCache {
  pub fn get(&self, app: &AppId) -> Option<ResolvedEntry> {
    self.entries.read().unwrap_or_else(PoisonError::into_inner).get(app).cloned()
  }

  /// Last write wins.
  pub fn insert(&self, app: AppId, entry: ResolvedEntry) {
    self.entries.write().unwrap_or_else(PoisonError::into_inner).insert(app, entry);
  }

  pub fn len(&self) -> usize {
    self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Tries loaders in order; the first success wins.
pub struct EntryResolver {
  loaders: Vec<Arc<dyn EntryLoader>>,
  cache: ModuleCache,
}

impl EntryResolver {
  pub fn new(loaders: Vec<Arc<dyn EntryLoader>>) -> Self {
    Self { loaders, cache: ModuleCache::default() }
  }

  /// Source transform (development only), build output, raw source.
  pub fn standard(config: &RenderConfig) -> Self {
    Self::new(vec![
      Arc::new(TransformingSourceLoader::new(&config.source_root, config.mode)),
      Arc::new(CompiledLoader::new(&config.dist_root)),
      Arc::new(RawSourceLoader::new(&config.source_root)),
    ])
  }

  /// Put `loader` ahead of every existing tier.
  pub fn with_loader_first(mut self, loader: impl EntryLoader + 'static) -> Self {
    self.loaders.insert(0, Arc::new(loader));
    self
  }

  pub fn cache(&self) -> &ModuleCache {
    &self.cache
  }

  pub async fn resolve(&self, app: &AppId) -> Result<ResolvedEntry, ResolutionError> {
    let mut attempts = Vec::new();

    for loader in &self.loaders {
      let tier = loader.tier();
      let path = loader.path(app);

      if loader.cacheable()
        && let Some(hit) = self.cache.get(app)
      {
        debug!(app = %app, tier = %tier, "entry served from cache");
        return Ok(hit);
      }

      match loader.load(app).await {
        Ok(module) => {
          let entry = ResolvedEntry::new(module, tier, path);
          if loader.cacheable() {
            self.cache.insert(app.clone(), entry.clone());
          }
          debug!(app = %app, tier = %tier, "entry resolved");
          return Ok(entry);
        }
        Err(reason) => {
          match &reason {
            LoadError::NotFound { .. } | LoadError::Disabled | LoadError::NotRegistered { .. } => {
              debug!(app = %app, tier = %tier, reason = %reason, "entry tier skipped");
            }
            _ => warn!(app = %app, tier = %tier, reason = %reason, "entry tier failed"),
          }
          attempts.push(Attempt { tier, path, reason });
        }
      }
    }

    Err(ResolutionError { app: app.clone(), attempts })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;
  use std::sync::atomic::{AtomicUsize, Ordering};

  use crate::entry::loader::BoxFuture;
  use crate::entry::module::{EntryModule, Rendered, Tier};
  use crate::errors::RenderInvocationError;

  struct Fixed(&'static str);

  impl EntryModule for Fixed {
    fn render(&self, _url: &str) -> Result<Rendered, RenderInvocationError> {
      Ok(Rendered { markup: self.0.to_string(), context: serde_json::Value::Null })
    }
  }

  /// Loader that succeeds with `Fixed(markup)` or fails, counting calls.
  struct Stub {
    tier: Tier,
    markup: Option<&'static str>,
    cacheable: bool,
    calls: Arc<AtomicUsize>,
  }

  impl Stub {
    fn ok(tier: Tier, markup: &'static str, cacheable: bool) -> Self {
      Self { tier, markup: Some(markup), cacheable, calls: Arc::default() }
    }

    fn failing(tier: Tier) -> Self {
      Self { tier, markup: None, cacheable: false, calls: Arc::default() }
    }
  }

  impl EntryLoader for Stub {
    fn tier(&self) -> Tier {
      self.tier
    }

    fn path(&self, app: &AppId) -> Option<PathBuf> {
      Some(PathBuf::from(format!("{}/{app}", self.tier)))
    }

    fn load(&self, _app: &AppId) -> BoxFuture<Result<Arc<dyn EntryModule>, LoadError>> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      let markup = self.markup;
      Box::pin(async move {
        match markup {
          Some(m) => Ok(Arc::new(Fixed(m)) as Arc<dyn EntryModule>),
          None => Err(LoadError::Transform { path: PathBuf::from("x"), message: "boom".into() }),
        }
      })
    }

    fn cacheable(&self) -> bool {
      self.cacheable
    }
  }

  fn markup(entry: &ResolvedEntry) -> String {
    entry.render("/").unwrap().markup
  }

  #[tokio::test]
  async fn first_success_wins() {
    let resolver = EntryResolver::new(vec![
      Arc::new(Stub::failing(Tier::Source)),
      Arc::new(Stub::ok(Tier::Compiled, "compiled", true)),
      Arc::new(Stub::ok(Tier::Raw, "raw", false)),
    ]);
    let entry = resolver.resolve(&AppId::host()).await.unwrap();
    assert_eq!(entry.tier(), Tier::Compiled);
    assert_eq!(markup(&entry), "compiled");
  }

  #[tokio::test]
  async fn all_failures_are_reported_in_order() {
    let resolver =
      EntryResolver::new(vec![Arc::new(Stub::failing(Tier::Source)), Arc::new(Stub::failing(Tier::Raw))]);
    let err = resolver.resolve(&AppId::host()).await.unwrap_err();
    let tiers: Vec<Tier> = err.attempts.iter().map(|a| a.tier).collect();
    assert_eq!(tiers, vec![Tier::Source, Tier::Raw]);
    assert_eq!(err.attempts[1].path, Some(PathBuf::from("raw/host")));
  }

  #[tokio::test]
  async fn cacheable_tier_loads_once() {
    let stub = Stub::ok(Tier::Compiled, "c", true);
    let calls = Arc::clone(&stub.calls);
    let resolver = EntryResolver::new(vec![Arc::new(stub)]);

    for _ in 0..3 {
      resolver.resolve(&AppId::host()).await.unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(resolver.cache().len(), 1);
  }

  #[tokio::test]
  async fn source_tiers_are_never_cached() {
    let stub = Stub::ok(Tier::Raw, "r", false);
    let calls = Arc::clone(&stub.calls);
    let resolver = EntryResolver::new(vec![Arc::new(stub)]);

    resolver.resolve(&AppId::host()).await.unwrap();
    resolver.resolve(&AppId::host()).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(resolver.cache().is_empty());
  }

  #[tokio::test]
  async fn source_tier_still_wins_over_cached_compiled_entry() {
    let resolver = EntryResolver::new(vec![
      Arc::new(Stub::ok(Tier::Source, "source", false)),
      Arc::new(Stub::ok(Tier::Compiled, "compiled", true)),
    ]);
    resolver.cache().insert(
      AppId::host(),
      ResolvedEntry::new(Arc::new(Fixed("stale")), Tier::Compiled, None),
    );
    let entry = resolver.resolve(&AppId::host()).await.unwrap();
    assert_eq!(markup(&entry), "source");
  }

  #[tokio::test]
  async fn cache_is_keyed_by_app() {
    let stub = Stub::ok(Tier::Compiled, "c", true);
    let calls = Arc::clone(&stub.calls);
    let resolver = EntryResolver::new(vec![Arc::new(stub)]);

    resolver.resolve(&AppId::host()).await.unwrap();
    resolver.resolve(&AppId::patient_portal()).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn default_config_tries_source_transform_first() {
    let dir = tempfile::tempdir().unwrap();
    let config = RenderConfig::default().rooted_at(dir.path());
    let err = EntryResolver::standard(&config).resolve(&AppId::host()).await.unwrap_err();
    assert_eq!(err.attempts[0].tier, Tier::Source);
    assert!(matches!(err.attempts[0].reason, LoadError::NotFound { .. }));
  }

  #[tokio::test]
  async fn loader_first_takes_precedence() {
    let resolver = EntryResolver::new(vec![Arc::new(Stub::ok(Tier::Compiled, "compiled", true))])
      .with_loader_first(Stub::ok(Tier::InProcess, "native", false));
    let entry = resolver.resolve(&AppId::host()).await.unwrap();
    assert_eq!(entry.tier(), Tier::InProcess);
  }
}
