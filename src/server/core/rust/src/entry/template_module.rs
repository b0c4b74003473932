/* src/server/core/rust/src/entry/template_module.rs */

use std::collections::HashMap;
use std::path::Path;

use isomorph_injector::Template;
use serde_json::{Value, json};

use crate::errors::{LoadError, RenderInvocationError};

use super::manifest::{EntryManifest, compose_layouts, insert_head};
use super::module::{EntryModule, Rendered};
use super::route::{RoutePattern, parse_query, split_url};

/// How much work to do when turning a manifest into an entry module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Build {
  /// Compose layouts, insert head markup, reject malformed templates.
  Checked,
  /// Page templates only, parsed leniently.
  Verbatim,
}

struct CompiledRoute {
  pattern: RoutePattern,
  template: Template,
}

/// Entry module backed by a manifest of routes and slot templates.
pub(crate) struct TemplateEntry {
  routes: Vec<CompiledRoute>,
  context: Value,
}

impl EntryModule for TemplateEntry {
  fn render(&self, url: &str) -> Result<Rendered, RenderInvocationError> {
    let (path, query) = split_url(url);
    let (route, params) = self
      .routes
      .iter()
      .find_map(|r| r.pattern.matches(path).map(|params| (r, params)))
      .ok_or_else(|| RenderInvocationError::NoRoute { url: url.to_string() })?;

    let data = json!({
      "url": url,
      "path": path,
      "query": parse_query(query),
      "params": params,
      "route": route.pattern.as_str(),
      "context": self.context,
    });
    Ok(Rendered { markup: route.template.render(&data), context: self.context.clone() })
  }
}

async fn read_template(base: &Path, rel: &str) -> Result<String, LoadError> {
  let path = base.join(rel);
  tokio::fs::read_to_string(&path).await.map_err(|e| LoadError::from_io(path, e))
}

/// Read every template the manifest references (relative to `manifest_path`'s
/// directory) and compile the routes.
pub(crate) async fn build_entry(
  manifest_path: &Path,
  manifest: EntryManifest,
  build: Build,
) -> Result<TemplateEntry, LoadError> {
  let base = manifest_path.parent().unwrap_or(Path::new("."));

  let mut layouts: HashMap<String, (String, Option<String>)> = HashMap::new();
  if build == Build::Checked {
    for (id, entry) in manifest.layouts {
      let template = read_template(base, &entry.template).await?;
      layouts.insert(id, (template, entry.parent));
    }
  }

  let mut routes = Vec::with_capacity(manifest.routes.len());
  for entry in manifest.routes {
    let page = read_template(base, &entry.template).await?;
    let template = match build {
      Build::Checked => {
        let mut source = match entry.layout.as_deref() {
          Some(layout) => compose_layouts(layout, &page, &layouts)
            .map_err(|message| LoadError::Transform { path: manifest_path.to_path_buf(), message })?,
          None => page,
        };
        if let Some(head) = entry.head.as_deref() {
          source = insert_head(&source, head);
        }
        Template::compile(&source)
          .map_err(|e| LoadError::Template { path: base.join(&entry.template), source: e })?
      }
      Build::Verbatim => Template::compile_lenient(&page),
    };
    routes.push(CompiledRoute { pattern: RoutePattern::parse(&entry.path), template });
  }

  Ok(TemplateEntry { routes, context: Value::Object(manifest.context) })
}
