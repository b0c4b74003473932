/* src/server/core/rust/src/entry/route.rs */

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
  Static(String),
  Param(String),
  /// `*` or `*name`: swallows the rest of the path.
  CatchAll(String),
}

/// Route path such as `/patients/:id` or `/files/*rest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoutePattern {
  source: String,
  segments: Vec<Segment>,
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
  path.split('/').filter(|s| !s.is_empty())
}

fn decode(s: &str) -> String {
  urlencoding::decode(s).map_or_else(|_| s.to_string(), |c| c.into_owned())
}

impl RoutePattern {
  pub(crate) fn parse(source: &str) -> Self {
    let segments = split_segments(source)
      .map(|s| {
        if let Some(name) = s.strip_prefix(':') {
          Segment::Param(name.to_string())
        } else if let Some(name) = s.strip_prefix('*') {
          Segment::CatchAll(if name.is_empty() { "*".to_string() } else { name.to_string() })
        } else {
          Segment::Static(s.to_string())
        }
      })
      .collect();
    Self { source: source.to_string(), segments }
  }

  pub(crate) fn as_str(&self) -> &str {
    &self.source
  }

  /// Captured params (percent-decoded) when `path` matches.
  pub(crate) fn matches(&self, path: &str) -> Option<Map<String, Value>> {
    let parts: Vec<&str> = split_segments(path).collect();
    let mut params = Map::new();

    for (i, segment) in self.segments.iter().enumerate() {
      match segment {
        Segment::CatchAll(name) => {
          let rest = parts.get(i..).unwrap_or_default().iter().map(|p| decode(p)).collect::<Vec<_>>().join("/");
          params.insert(name.clone(), Value::String(rest));
          return Some(params);
        }
        Segment::Static(expected) => {
          if parts.get(i) != Some(&expected.as_str()) {
            return None;
          }
        }
        Segment::Param(name) => {
          let value = parts.get(i)?;
          params.insert(name.clone(), Value::String(decode(value)));
        }
      }
    }

    (parts.len() == self.segments.len()).then_some(params)
  }
}

/// Split `path?query#fragment` into path and query.
pub(crate) fn split_url(url: &str) -> (&str, &str) {
  let url = url.split_once('#').map_or(url, |(before, _)| before);
  let (path, query) = url.split_once('?').unwrap_or((url, ""));
  (if path.is_empty() { "/" } else { path }, query)
}

/// `a=1&b=x+y` into an object; repeated keys keep the last value.
pub(crate) fn parse_query(query: &str) -> Map<String, Value> {
  query
    .split('&')
    .filter(|pair| !pair.is_empty())
    .map(|pair| {
      let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
      (decode(&k.replace('+', " ")), Value::String(decode(&v.replace('+', " "))))
    })
    .collect()
}
