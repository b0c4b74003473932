/* src/server/core/rust/src/entry/native.rs */

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use isomorph_client::{Compose, ComposeContext, RenderEnvironment, RenderToString};
use serde_json::Value;

use crate::app::AppId;
use crate::errors::{LoadError, RenderInvocationError};

use super::loader::{BoxFuture, EntryLoader};
use super::module::{EntryModule, Rendered, Tier};

/// Renders a `Compose` app on the server, the same value the browser
/// bootstrap hydrates.
pub struct ComposedEntry<C> {
  app: C,
}

impl<C: Compose + 'static> ComposedEntry<C> {
  pub fn new(app: C) -> Self {
    Self { app }
  }
}

impl<C: Compose + 'static> EntryModule for ComposedEntry<C> {
  fn render(&self, url: &str) -> Result<Rendered, RenderInvocationError> {
    let view = self.app.compose(&ComposeContext::new(url, RenderEnvironment::Server));
    Ok(Rendered { markup: view.render_to_string(), context: Value::Null })
  }
}

/// Entry modules linked into the server binary.
#[derive(Default)]
pub struct InProcessLoader {
  modules: HashMap<AppId, Arc<dyn EntryModule>>,
}

impl InProcessLoader {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(mut self, app: AppId, module: impl EntryModule) -> Self {
    self.modules.insert(app, Arc::new(module));
    self
  }
}

impl EntryLoader for InProcessLoader {
  fn tier(&self) -> Tier {
    Tier::InProcess
  }

  fn path(&self, _app: &AppId) -> Option<PathBuf> {
    None
  }

  fn load(&self, app: &AppId) -> BoxFuture<Result<Arc<dyn EntryModule>, LoadError>> {
    let found = self.modules.get(app).cloned().ok_or_else(|| LoadError::NotRegistered { app: app.clone() });
    Box::pin(async move { found })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use isomorph_client::View;

  fn dashboard(ctx: &ComposeContext) -> View {
    View::element("div")
      .child(View::element("p").child(ctx.url.clone()))
      .child(View::element("button").flag("disabled", !ctx.controls_enabled()).child("Save"))
      .into()
  }

  #[test]
  fn composed_entry_renders_server_view() {
    let out = ComposedEntry::new(dashboard).render("/dashboard").unwrap();
    assert_eq!(out.markup, r#"<div><p>/dashboard</p><button disabled="">Save</button></div>"#);
  }

  #[tokio::test]
  async fn in_process_loader_serves_registered_apps_only() {
    let loader = InProcessLoader::new().register(AppId::patient_portal(), ComposedEntry::new(dashboard));
    assert!(loader.load(&AppId::patient_portal()).await.is_ok());
    let err = loader.load(&AppId::host()).await.err().unwrap();
    assert!(matches!(err, LoadError::NotRegistered { .. }));
  }
}
