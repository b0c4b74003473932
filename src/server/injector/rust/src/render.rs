/* src/server/injector/rust/src/render.rs */

use serde_json::Value;

use crate::ast::{AstNode, SlotMode};
use crate::helpers::{escape_html, is_boolean_attr, is_truthy, resolve, stringify};

/// Attribute waiting to be attached to the next opening tag after its marker.
pub(crate) struct PendingAttr {
  marker: String,
  name: String,
  value: String,
}

#[derive(Default)]
pub(crate) struct RenderContext {
  pub(crate) attrs: Vec<PendingAttr>,
}

impl RenderContext {
  fn defer_attr(&mut self, out: &mut String, name: &str, value: String) {
    // NUL never appears in valid HTML, so it cannot collide with template text
    let marker = format!("\x00ISO_ATTR_{}\x00", self.attrs.len());
    out.push_str(&marker);
    self.attrs.push(PendingAttr { marker, name: name.to_string(), value });
  }
}

pub(crate) fn render(nodes: &[AstNode], data: &Value, ctx: &mut RenderContext) -> String {
  let mut out = String::new();

  for node in nodes {
    match node {
      AstNode::Text(text) => out.push_str(text),

      AstNode::Slot { path, mode } => {
        let value = stringify(resolve(path, data).unwrap_or(&Value::Null));
        match mode {
          SlotMode::Text => out.push_str(&escape_html(&value)),
          SlotMode::Html => out.push_str(&value.replace('\0', "")),
        }
      }

      AstNode::Attr { path, attr_name } => match resolve(path, data) {
        Some(value) if is_boolean_attr(attr_name) => {
          if is_truthy(value) {
            ctx.defer_attr(&mut out, attr_name, String::new());
          }
        }
        Some(value) => ctx.defer_attr(&mut out, attr_name, escape_html(&stringify(value))),
        None => {}
      },

      AstNode::If { path, then_nodes, else_nodes } => {
        let branch =
          if resolve(path, data).is_some_and(is_truthy) { then_nodes } else { else_nodes };
        out.push_str(&render(branch, data, ctx));
      }

      AstNode::Each { path, body_nodes } => {
        let Some(Value::Array(items)) = resolve(path, data) else {
          continue;
        };
        for item in items {
          out.push_str(&render(body_nodes, &scoped(data, item), ctx));
        }
      }

      AstNode::Match { path, branches } => {
        let key = stringify(resolve(path, data).unwrap_or(&Value::Null));
        if let Some((_, body)) = branches.iter().find(|(value, _)| *value == key) {
          out.push_str(&render(body, data, ctx));
        }
      }
    }
  }

  out
}

/// Loop scope: `$` is the current item, `$$` the enclosing loop's item.
fn scoped(data: &Value, item: &Value) -> Value {
  let Value::Object(map) = data else {
    return data.clone();
  };
  let mut map = map.clone();
  if let Some(outer) = map.get("$").cloned() {
    map.insert("$$".to_string(), outer);
  }
  map.insert("$".to_string(), item.clone());
  Value::Object(map)
}

/// Next `<` that opens an element, skipping closing tags and comments.
fn next_open_tag(html: &str, from: usize) -> Option<usize> {
  let bytes = html.as_bytes();
  (from..bytes.len()).find(|&i| bytes[i] == b'<' && bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic))
}

fn tag_name_end(html: &str, tag_start: usize) -> usize {
  html[tag_start + 1..]
    .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
    .map_or(html.len(), |rel| tag_start + 1 + rel)
}

/// Second pass: remove each marker and add its attribute to the following tag.
pub(crate) fn attach_attrs(mut html: String, attrs: &[PendingAttr]) -> String {
  // Reverse order keeps earlier marker offsets valid while later tags grow
  for attr in attrs.iter().rev() {
    let Some(pos) = html.find(&attr.marker) else {
      continue;
    };
    html.replace_range(pos..pos + attr.marker.len(), "");
    if let Some(start) = next_open_tag(&html, pos) {
      let at = tag_name_end(&html, start);
      html.insert_str(at, &format!(r#" {}="{}""#, attr.name, attr.value));
    }
  }
  html
}
