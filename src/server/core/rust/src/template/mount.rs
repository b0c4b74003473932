/* src/server/core/rust/src/template/mount.rs */

//! Structural location of the mount element's inner content.
//!
//! The scanner understands comments, quoted attribute values, raw-text
//! elements and same-name nesting. It does not build a tree.

use std::ops::Range;

const RAW_TEXT: &[&str] = &["script", "style", "textarea", "title"];

const VOID: &[&str] = &[
  "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

#[derive(Debug)]
struct Tag<'a> {
  name: &'a str,
  start: usize,
  /// One past the closing `>`.
  end: usize,
  closing: bool,
  self_closing: bool,
  id: Option<&'a str>,
}

impl Tag<'_> {
  fn opens(&self) -> bool {
    !self.closing && !self.self_closing && !is_in(VOID, self.name)
  }
}

fn is_in(set: &[&str], name: &str) -> bool {
  set.iter().any(|s| s.eq_ignore_ascii_case(name))
}

fn name_end(bytes: &[u8], from: usize) -> usize {
  bytes[from..]
    .iter()
    .position(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/')
    .map_or(bytes.len(), |p| from + p)
}

/// Parse the tag starting at `start` (which holds `<`). `None` when the
/// input ends inside the tag.
fn parse_tag(html: &str, start: usize) -> Option<Tag<'_>> {
  let bytes = html.as_bytes();
  let closing = bytes.get(start + 1) == Some(&b'/');
  let name_start = if closing { start + 2 } else { start + 1 };
  let name_stop = name_end(bytes, name_start);
  let name = &html[name_start..name_stop];

  let mut i = name_stop;
  let mut id = None;
  let mut self_closing = false;
  loop {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
      i += 1;
    }
    match bytes.get(i)? {
      b'>' => break,
      b'/' => {
        self_closing = bytes.get(i + 1) == Some(&b'>');
        i += 1;
        continue;
      }
      _ => {}
    }

    let attr_start = i;
    while bytes.get(i).is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/')) {
      i += 1;
    }
    let attr = &html[attr_start..i];
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
      i += 1;
    }
    if bytes.get(i) != Some(&b'=') {
      continue;
    }
    i += 1;
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
      i += 1;
    }
    let value = match bytes.get(i)? {
      q @ (b'"' | b'\'') => {
        let close = html[i + 1..].find(*q as char)? + i + 1;
        let v = &html[i + 1..close];
        i = close + 1;
        v
      }
      _ => {
        let from = i;
        while bytes.get(i).is_some_and(|b| !b.is_ascii_whitespace() && *b != b'>') {
          i += 1;
        }
        &html[from..i]
      }
    };
    if attr.eq_ignore_ascii_case("id") {
      id = Some(value);
    }
  }

  Some(Tag { name, start, end: i + 1, closing, self_closing, id })
}

/// Iterate over tags in document order, skipping comments, doctypes and the
/// bodies of raw-text elements.
struct Tags<'a> {
  html: &'a str,
  pos: usize,
  raw_text: Option<&'a str>,
}

impl<'a> Tags<'a> {
  fn new(html: &'a str, pos: usize) -> Self {
    Self { html, pos, raw_text: None }
  }
}

impl<'a> Iterator for Tags<'a> {
  type Item = Tag<'a>;

  fn next(&mut self) -> Option<Tag<'a>> {
    let html = self.html;
    let bytes = html.as_bytes();
    loop {
      let lt = html[self.pos..].find('<')? + self.pos;
      let rest = &html[lt..];

      if let Some(raw) = self.raw_text {
        let is_end = rest.starts_with("</")
          && rest.as_bytes().get(2..2 + raw.len()).is_some_and(|n| n.eq_ignore_ascii_case(raw.as_bytes()));
        if !is_end {
          self.pos = lt + 1;
          continue;
        }
        self.raw_text = None;
      }

      if rest.starts_with("<!--") {
        self.pos = html[lt + 4..].find("-->").map(|p| lt + 4 + p + 3)?;
        continue;
      }
      if rest.starts_with("<!") || rest.starts_with("<?") {
        self.pos = html[lt..].find('>').map(|p| lt + p + 1)?;
        continue;
      }
      let first = if rest.starts_with("</") { bytes.get(lt + 2) } else { bytes.get(lt + 1) };
      if !first.is_some_and(u8::is_ascii_alphabetic) {
        self.pos = lt + 1;
        continue;
      }

      let tag = parse_tag(html, lt)?;
      self.pos = tag.end;
      if !tag.closing && !tag.self_closing && is_in(RAW_TEXT, tag.name) {
        self.raw_text = Some(tag.name);
      }
      return Some(tag);
    }
  }
}

/// Inner-content span of the element closing the one opened at `open`.
fn content_span(html: &str, open: &Tag<'_>) -> Option<Range<usize>> {
  let mut depth = 1usize;
  for tag in Tags::new(html, open.end) {
    if !tag.name.eq_ignore_ascii_case(open.name) {
      continue;
    }
    if tag.closing {
      depth -= 1;
      if depth == 0 {
        return Some(open.end..tag.start);
      }
    } else if tag.opens() {
      depth += 1;
    }
  }
  None
}

/// Locate the single element whose `id` equals `mount_id`.
///
/// `Err(n)` reports how many usable mount elements were found when that is
/// not exactly one. A void or unclosed element is not usable.
pub(crate) fn locate(html: &str, mount_id: &str) -> Result<Range<usize>, usize> {
  let spans: Vec<Option<Range<usize>>> = Tags::new(html, 0)
    .filter(|t| !t.closing && t.id == Some(mount_id))
    .map(|t| if t.opens() { content_span(html, &t) } else { None })
    .collect();

  match spans.as_slice() {
    [Some(span)] => Ok(span.clone()),
    _ => Err(spans.iter().flatten().count()),
  }
}
