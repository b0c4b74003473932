/* src/server/core/rust/src/render.rs */

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use tracing::{info, warn};

use crate::app::AppId;
use crate::entry::{EntryResolver, ResolvedEntry};
use crate::errors::RenderInvocationError;
use crate::template::TemplateStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
  pub app: AppId,
  /// Path and query as the app sees it, prefix already removed.
  pub url: String,
}

impl RenderRequest {
  pub fn new(app: AppId, url: impl Into<String>) -> Self {
    Self { app, url: url.into() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
  pub html: String,
  /// The entry could not be resolved or failed; `html` is the bare template.
  pub degraded: bool,
}

/// resolve, render, template, splice. Never fails.
pub struct RenderOrchestrator {
  resolver: EntryResolver,
  templates: TemplateStore,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    (*s).to_string()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else {
    "non-string panic payload".to_string()
  }
}

/// Run the entry once, turning both errors and panics into `Err`.
fn invoke(entry: &ResolvedEntry, url: &str) -> Result<String, RenderInvocationError> {
  match catch_unwind(AssertUnwindSafe(|| entry.render(url))) {
    Ok(result) => result.map(|r| r.markup),
    Err(payload) => Err(RenderInvocationError::Panicked(panic_message(payload.as_ref()))),
  }
}

impl RenderOrchestrator {
  pub fn new(resolver: EntryResolver, templates: TemplateStore) -> Self {
    Self { resolver, templates }
  }

  pub fn resolver(&self) -> &EntryResolver {
    &self.resolver
  }

  pub fn templates(&self) -> &TemplateStore {
    &self.templates
  }

  pub async fn render(&self, request: RenderRequest) -> RenderOutcome {
    let started = Instant::now();
    let RenderRequest { app, url } = request;

    let (markup, tier) = match self.resolver.resolve(&app).await {
      Ok(entry) => match invoke(&entry, &url) {
        Ok(markup) => (Some(markup), Some(entry.tier())),
        Err(e) => {
          warn!(app = %app, url = %url, tier = %entry.tier(), error = %e, "entry render failed");
          (None, Some(entry.tier()))
        }
      },
      Err(e) => {
        warn!(app = %app, url = %url, error = %e, "entry resolution failed");
        (None, None)
      }
    };
    let degraded = markup.is_none();

    let document = self.templates.get(&app).await;
    let template_tier = document.tier();
    let html = match markup {
      Some(m) if !m.is_empty() => document.splice(&m),
      _ => document.into_html(),
    };

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let tier = tier.map_or_else(|| "none".to_string(), |t| t.to_string());
    info!(
      app = %app,
      url = %url,
      tier = %tier,
      template = %template_tier,
      degraded,
      elapsed_ms,
      "rendered"
    );
    RenderOutcome { html, degraded }
  }
}
