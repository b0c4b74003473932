/* src/server/core/rust/src/template/store.rs */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use isomorph_injector::escape_html;
use tracing::{debug, warn};

use crate::app::{AppId, AppSpec};
use crate::config::RenderConfig;
use crate::errors::TemplateReadError;

use super::{TemplateDocument, TemplateTier};

/// HTML shells per app: build output, then source tree, then a built-in page.
/// Reads hit the filesystem every time so edits show up without a restart.
pub struct TemplateStore {
  dist_root: PathBuf,
  source_root: PathBuf,
  mount_id: String,
  titles: HashMap<AppId, String>,
}

impl TemplateStore {
  pub fn new(config: &RenderConfig, apps: &[AppSpec]) -> Self {
    Self {
      dist_root: config.dist_root.clone(),
      source_root: config.source_root.clone(),
      mount_id: config.mount_id.clone(),
      titles: apps.iter().map(|a| (a.id.clone(), a.title().to_string())).collect(),
    }
  }

  pub fn built_path(&self, app: &AppId) -> PathBuf {
    self.dist_root.join("apps").join(app.as_str()).join("index.html")
  }

  pub fn source_path(&self, app: &AppId) -> PathBuf {
    self.source_root.join("apps").join(app.as_str()).join("index.html")
  }

  /// Never fails: the built-in page is the last resort.
  pub async fn get(&self, app: &AppId) -> TemplateDocument {
    let tiers = [(TemplateTier::Built, self.built_path(app)), (TemplateTier::Source, self.source_path(app))];
    for (tier, path) in tiers {
      match self.read(&path, tier).await {
        Ok(Some(doc)) => {
          debug!(app = %app, tier = %tier, path = %path.display(), "template loaded");
          return doc;
        }
        Ok(None) => debug!(app = %app, tier = %tier, path = %path.display(), "template absent"),
        Err(e) => warn!(app = %app, tier = %tier, error = %e, "template unusable, skipping"),
      }
    }
    debug!(app = %app, "using built-in template");
    self.fallback(app)
  }

  async fn read(&self, path: &Path, tier: TemplateTier) -> Result<Option<TemplateDocument>, TemplateReadError> {
    let html = match tokio::fs::read_to_string(path).await {
      Ok(html) => html,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
      Err(source) => return Err(TemplateReadError::Io { path: path.to_path_buf(), source }),
    };
    TemplateDocument::parse(html, &self.mount_id, tier)
      .map(Some)
      .map_err(|found| TemplateReadError::MountPoint { path: path.to_path_buf(), found })
  }

  pub fn fallback(&self, app: &AppId) -> TemplateDocument {
    let title = self.titles.get(app).map_or(app.as_str(), String::as_str);
    let head = format!(
      "<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"UTF-8\" />\n    \
       <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n    \
       <title>{}</title>\n  </head>\n  <body>\n    <div id=\"{}\">",
      escape_html(title),
      escape_html(&self.mount_id),
    );
    let content = "<!-- SSR_CONTENT -->";
    let tail = "</div>\n    <script type=\"module\" src=\"/src/main.js\"></script>\n  </body>\n</html>\n";
    let mount = head.len()..head.len() + content.len();
    TemplateDocument::from_parts(format!("{head}{content}{tail}"), mount, TemplateTier::Fallback)
  }
}
