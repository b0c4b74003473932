/* src/server/core/rust/src/template/mod.rs */

mod mount;
mod store;

use std::fmt;
use std::ops::Range;

pub use store::TemplateStore;

/// Which source supplied a template document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateTier {
  Built,
  Source,
  Fallback,
}

impl fmt::Display for TemplateTier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Built => "built",
      Self::Source => "source",
      Self::Fallback => "fallback",
    })
  }
}

/// HTML shell with its mount element's inner content located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
  html: String,
  mount: Range<usize>,
  tier: TemplateTier,
}

impl TemplateDocument {
  /// `Err(n)` carries the number of usable mount elements when it is not one.
  pub fn parse(html: String, mount_id: &str, tier: TemplateTier) -> Result<Self, usize> {
    let mount = mount::locate(&html, mount_id)?;
    Ok(Self { html, mount, tier })
  }

  pub(crate) fn from_parts(html: String, mount: Range<usize>, tier: TemplateTier) -> Self {
    Self { html, mount, tier }
  }

  pub fn tier(&self) -> TemplateTier {
    self.tier
  }

  pub fn html(&self) -> &str {
    &self.html
  }

  /// Current inner content of the mount element.
  pub fn mount_content(&self) -> &str {
    &self.html[self.mount.clone()]
  }

  /// Replace the whole mount content with `markup`.
  pub fn splice(&self, markup: &str) -> String {
    let mut out = String::with_capacity(self.html.len() - self.mount.len() + markup.len());
    out.push_str(&self.html[..self.mount.start]);
    out.push_str(markup);
    out.push_str(&self.html[self.mount.end..]);
    out
  }

  pub fn into_html(self) -> String {
    self.html
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SHELL: &str = "<html><body><div id=\"root\"><!-- SSR_CONTENT --></div><script src=\"/a.js\"></script></body></html>";

  fn doc(html: &str) -> TemplateDocument {
    TemplateDocument::parse(html.to_string(), "root", TemplateTier::Source).unwrap()
  }

  #[test]
  fn splice_replaces_marker() {
    let html = doc(SHELL).splice("<p>hi</p>");
    assert_eq!(
      html,
      "<html><body><div id=\"root\"><p>hi</p></div><script src=\"/a.js\"></script></body></html>"
    );
  }

  #[test]
  fn splice_into_empty_mount() {
    assert_eq!(doc("<div id=\"root\"></div>").splice("<div>D</div>"), "<div id=\"root\"><div>D</div></div>");
  }

  #[test]
  fn splicing_twice_keeps_one_copy() {
    let once = doc(SHELL).splice("<p>hi</p>");
    let twice = doc(&once).splice("<p>hi</p>");
    assert_eq!(once, twice);
    assert_eq!(twice.matches("<p>hi</p>").count(), 1);
  }

  #[test]
  fn splice_is_pure() {
    let d = doc(SHELL);
    assert_eq!(d.splice("a"), d.splice("a"));
    assert_eq!(d.html(), SHELL);
  }

  #[test]
  fn into_html_is_byte_for_byte() {
    assert_eq!(doc(SHELL).into_html(), SHELL);
  }

  #[test]
  fn parse_reports_mount_count() {
    let err = TemplateDocument::parse("<div></div>".into(), "root", TemplateTier::Built).unwrap_err();
    assert_eq!(err, 0);
  }
}
