/* src/server/injector/rust/src/token.rs */

#[derive(Debug)]
pub(crate) enum Token {
  Text(String),
  /// Directive body between `<!--iso:` and `-->`.
  Marker(String),
}

pub(crate) const MARKER_OPEN: &str = "<!--iso:";
pub(crate) const MARKER_CLOSE: &str = "-->";

pub(crate) fn tokenize(template: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  let mut rest = template;

  while !rest.is_empty() {
    let Some(start) = rest.find(MARKER_OPEN) else {
      tokens.push(Token::Text(rest.to_string()));
      break;
    };
    if start > 0 {
      tokens.push(Token::Text(rest[..start].to_string()));
    }
    let body = &rest[start + MARKER_OPEN.len()..];
    match body.find(MARKER_CLOSE) {
      Some(end) => {
        tokens.push(Token::Marker(body[..end].to_string()));
        rest = &body[end + MARKER_CLOSE.len()..];
      }
      None => {
        // Unterminated marker is kept as literal text
        tokens.push(Token::Text(rest[start..].to_string()));
        break;
      }
    }
  }

  tokens
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_template_has_no_tokens() {
    assert!(tokenize("").is_empty());
  }

  #[test]
  fn plain_html_is_one_text_token() {
    let tokens = tokenize("<p>hello</p>");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text(s) if s == "<p>hello</p>"));
  }

  #[test]
  fn marker_between_text() {
    let tokens = tokenize("a<!--iso:x-->b");
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[0], Token::Text(s) if s == "a"));
    assert!(matches!(&tokens[1], Token::Marker(s) if s == "x"));
    assert!(matches!(&tokens[2], Token::Text(s) if s == "b"));
  }

  #[test]
  fn adjacent_markers() {
    let tokens = tokenize("<!--iso:a--><!--iso:b-->");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[1], Token::Marker(s) if s == "b"));
  }

  #[test]
  fn unterminated_marker_stays_text() {
    let tokens = tokenize("x<!--iso:y");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[1], Token::Text(s) if s == "<!--iso:y"));
  }

  #[test]
  fn ordinary_comments_are_text() {
    let tokens = tokenize("<div id=\"root\"><!-- SSR_CONTENT --></div>");
    assert_eq!(tokens.len(), 1);
  }
}
