/* src/server/injector/rust/src/helpers.rs */

use serde_json::Value;

/// Walk a dotted path (`patient.name.given`) through nested objects.
pub(crate) fn resolve<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
  path.split('.').try_fold(data, |current, key| current.get(key))
}

pub(crate) fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_none_or(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(items) => !items.is_empty(),
    Value::Object(_) => true,
  }
}

pub(crate) fn stringify(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::String(s) => s.clone(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    other => other.to_string(),
  }
}

// Present means true: truthy renders as `attr=""`, falsy drops the attribute.
const BOOLEAN_ATTRS: &[&str] = &[
  "async",
  "autofocus",
  "checked",
  "defer",
  "disabled",
  "hidden",
  "multiple",
  "novalidate",
  "open",
  "readonly",
  "required",
  "selected",
];

pub(crate) fn is_boolean_attr(name: &str) -> bool {
  BOOLEAN_ATTRS.contains(&name)
}

pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      // Reserved for attribute markers
      '\0' => {}
      c => out.push(c),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn resolve_nested_and_missing() {
    let data = json!({"a": {"b": {"c": 42}}, "n": null});
    assert_eq!(resolve("a.b.c", &data), Some(&json!(42)));
    assert_eq!(resolve("a.x", &data), None);
    assert_eq!(resolve("n.b", &data), None);
  }

  #[test]
  fn truthiness() {
    for v in [json!(true), json!(1), json!(-0.5), json!("x"), json!([0]), json!({})] {
      assert!(is_truthy(&v), "{v} should be truthy");
    }
    for v in [json!(false), json!(null), json!(0), json!(0.0), json!(""), json!([])] {
      assert!(!is_truthy(&v), "{v} should be falsy");
    }
  }

  #[test]
  fn stringify_scalars() {
    assert_eq!(stringify(&json!(null)), "");
    assert_eq!(stringify(&json!("s")), "s");
    assert_eq!(stringify(&json!(7)), "7");
    assert_eq!(stringify(&json!(false)), "false");
  }

  #[test]
  fn escapes_markup_characters() {
    assert_eq!(escape_html("<a href=\"x\">'&'</a>"), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;");
  }
}
