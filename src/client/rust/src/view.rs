/* src/client/rust/src/view.rs */

use isomorph_injector::escape_html;

/// Renderable tree shared by the server entry and the browser bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
  Element(Element),
  Text(String),
  /// Markup inserted verbatim.
  Raw(String),
  Fragment(Vec<View>),
  Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  tag: String,
  attrs: Vec<(String, String)>,
  children: Vec<View>,
}

fn is_void(tag: &str) -> bool {
  matches!(
    tag,
    "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "source" | "track" | "wbr"
  )
}

impl Element {
  pub fn new(tag: impl Into<String>) -> Self {
    Self { tag: tag.into(), attrs: Vec::new(), children: Vec::new() }
  }

  pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.attrs.push((name.into(), value.into()));
    self
  }

  /// Boolean attribute, emitted only when `on`.
  pub fn flag(self, name: impl Into<String>, on: bool) -> Self {
    if on { self.attr(name, "") } else { self }
  }

  pub fn child(mut self, child: impl Into<View>) -> Self {
    self.children.push(child.into());
    self
  }

  pub fn children<I>(mut self, children: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<View>,
  {
    self.children.extend(children.into_iter().map(Into::into));
    self
  }
}

impl View {
  pub fn element(tag: impl Into<String>) -> Element {
    Element::new(tag)
  }

  pub fn text(content: impl Into<String>) -> Self {
    Self::Text(content.into())
  }

  pub fn raw(markup: impl Into<String>) -> Self {
    Self::Raw(markup.into())
  }
}

impl From<Element> for View {
  fn from(el: Element) -> Self {
    Self::Element(el)
  }
}

impl From<&str> for View {
  fn from(s: &str) -> Self {
    Self::Text(s.to_string())
  }
}

impl From<String> for View {
  fn from(s: String) -> Self {
    Self::Text(s)
  }
}

pub trait RenderToString {
  fn render_to_string(&self) -> String;
}

impl RenderToString for View {
  fn render_to_string(&self) -> String {
    let mut out = String::new();
    write_view(self, &mut out);
    out
  }
}

fn write_view(view: &View, out: &mut String) {
  match view {
    View::Element(el) => {
      out.push('<');
      out.push_str(&el.tag);
      for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
      }
      out.push('>');
      if is_void(&el.tag) {
        return;
      }
      for child in &el.children {
        write_view(child, out);
      }
      out.push_str("</");
      out.push_str(&el.tag);
      out.push('>');
    }
    View::Text(text) => out.push_str(&escape_html(text)),
    View::Raw(markup) => out.push_str(markup),
    View::Fragment(children) => children.iter().for_each(|c| write_view(c, out)),
    View::Empty => {}
  }
}
