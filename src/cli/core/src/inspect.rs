/* src/cli/core/src/inspect.rs */

#![allow(clippy::print_stdout)]

use std::path::Path;

use anyhow::{Result, bail};
use isomorph_server::{AppId, RenderRequest, Route};

use crate::config::IsomorphConfig;
use crate::serve::build_server;

/// Print the tier that wins for `app` and, given a URL, what it renders.
pub async fn resolve(base: &Path, config: &IsomorphConfig, app: &str, url: Option<&str>) -> Result<()> {
  let app = AppId::new(app)?;
  let parts = build_server(base, config).into_parts()?;
  let entry = parts.orchestrator.resolver().resolve(&app).await?;

  match entry.path() {
    Some(path) => println!("{app}: {} ({})", entry.tier(), path.display()),
    None => println!("{app}: {}", entry.tier()),
  }

  if let Some(url) = url {
    let rendered = entry.render(url)?;
    println!("{}", rendered.markup);
    if !rendered.context.is_null() {
      println!("{}", serde_json::to_string_pretty(&rendered.context)?);
    }
  }
  Ok(())
}

/// Render `path` exactly as the HTTP server would and print the document.
pub async fn render(base: &Path, config: &IsomorphConfig, path: &str) -> Result<()> {
  let parts = build_server(base, config).into_parts()?;
  let Route::App { app, url } = parts.routes.partition(path) else {
    bail!("{path} is an API path; the server answers it with 404");
  };

  let outcome = parts.orchestrator.render(RenderRequest::new(app.clone(), url)).await;
  if outcome.degraded {
    tracing::warn!(app = %app, "render degraded, output is the bare template");
  }
  print!("{}", outcome.html);
  Ok(())
}
