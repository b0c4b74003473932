/* src/server/core/rust/src/server.rs */

use std::sync::Arc;

use crate::app::AppSpec;
use crate::config::RenderConfig;
use crate::entry::{EntryLoader, EntryResolver};
use crate::errors::ConfigError;
use crate::render::RenderOrchestrator;
use crate::routing::AppRoutes;
use crate::template::TemplateStore;

/// Framework-agnostic parts extracted from `IsomorphServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct IsomorphParts {
  pub orchestrator: Arc<RenderOrchestrator>,
  pub routes: Arc<AppRoutes>,
  pub render: RenderConfig,
}

pub struct IsomorphServer {
  render: RenderConfig,
  apps: Vec<AppSpec>,
  api_prefix: String,
  extra_loaders: Vec<Box<dyn FnOnce(EntryResolver) -> EntryResolver + Send>>,
}

impl IsomorphServer {
  pub fn new(render: RenderConfig) -> Self {
    Self { render, apps: AppSpec::standard(), api_prefix: "/api".to_string(), extra_loaders: Vec::new() }
  }

  pub fn apps(mut self, apps: Vec<AppSpec>) -> Self {
    self.apps = apps;
    self
  }

  pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.api_prefix = prefix.into();
    self
  }

  /// Add a loader ahead of the standard chain. Later calls go further ahead.
  pub fn loader_first(mut self, loader: impl EntryLoader + 'static) -> Self {
    self.extra_loaders.push(Box::new(move |resolver| resolver.with_loader_first(loader)));
    self
  }

  /// Validate the app set and assemble the render pipeline.
  pub fn into_parts(self) -> Result<IsomorphParts, ConfigError> {
    let routes = AppRoutes::new(&self.apps, &self.api_prefix)?;
    let resolver = self.extra_loaders.into_iter().fold(EntryResolver::standard(&self.render), |r, add| add(r));
    let templates = TemplateStore::new(&self.render, &self.apps);

    Ok(IsomorphParts {
      orchestrator: Arc::new(RenderOrchestrator::new(resolver, templates)),
      routes: Arc::new(routes),
      render: self.render,
    })
  }
}
