/* src/server/core/rust/src/entry/manifest.rs */

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::{Map, Value};

pub(crate) const OUTLET: &str = "<!--iso:outlet-->";

/// On-disk description of an entry module, TOML in the source tree and JSON
/// in build output.
#[derive(Debug, Deserialize)]
pub(crate) struct EntryManifest {
  #[serde(default)]
  pub(crate) context: Map<String, Value>,
  pub(crate) routes: Vec<RouteEntry>,
  #[serde(default)]
  pub(crate) layouts: HashMap<String, LayoutEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteEntry {
  pub(crate) path: String,
  pub(crate) template: String,
  #[serde(default)]
  pub(crate) layout: Option<String>,
  /// Extra `<head>` markup for this route, placed before `</head>`.
  #[serde(default)]
  pub(crate) head: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LayoutEntry {
  pub(crate) template: String,
  #[serde(default)]
  pub(crate) parent: Option<String>,
}

/// Wrap `page` in its layout chain, innermost first, each layout's outlet
/// receiving the content built so far.
pub(crate) fn compose_layouts(
  layout_id: &str,
  page: &str,
  layouts: &HashMap<String, (String, Option<String>)>,
) -> Result<String, String> {
  let mut result = page.to_string();
  let mut seen = HashSet::new();
  let mut current = Some(layout_id.to_string());

  while let Some(id) = current {
    if !seen.insert(id.clone()) {
      return Err(format!("layout cycle through \"{id}\""));
    }
    let Some((template, parent)) = layouts.get(&id) else {
      return Err(format!("unknown layout \"{id}\""));
    };
    if !template.contains(OUTLET) {
      return Err(format!("layout \"{id}\" has no {OUTLET}"));
    }
    result = template.replacen(OUTLET, &result, 1);
    current = parent.clone();
  }

  Ok(result)
}

pub(crate) fn insert_head(html: &str, head: &str) -> String {
  match html.find("</head>") {
    Some(pos) => format!("{}{head}{}", &html[..pos], &html[pos..]),
    None => html.to_string(),
  }
}
