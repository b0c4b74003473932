/* src/server/injector/rust/src/parser.rs */

use crate::ast::{AstNode, SlotMode};
use crate::token::Token;

/// Problem found while building the AST. Lenient rendering ignores these,
/// strict compilation turns the first one into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub kind: DiagnosticKind,
  pub directive: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
  /// `endif:x`, `endeach`, `endmatch`, `else` or `when:` with no open block
  StrayClose,
  /// Block opened but the template ended first
  Unclosed,
}

struct Parser<'t> {
  tokens: &'t [Token],
  pos: usize,
  diagnostics: Vec<Diagnostic>,
}

pub(crate) fn parse(tokens: &[Token]) -> (Vec<AstNode>, Vec<Diagnostic>) {
  let mut parser = Parser { tokens, pos: 0, diagnostics: Vec::new() };
  let nodes = parser.block(&|_| false);
  (nodes, parser.diagnostics)
}

fn is_close_directive(directive: &str) -> bool {
  directive.starts_with("endif:")
    || directive.starts_with("when:")
    || matches!(directive, "endeach" | "endmatch" | "else")
}

impl Parser<'_> {
  fn peek_marker(&self) -> Option<&str> {
    match self.tokens.get(self.pos) {
      Some(Token::Marker(d)) => Some(d.as_str()),
      _ => None,
    }
  }

  fn report(&mut self, kind: DiagnosticKind, directive: impl Into<String>) {
    self.diagnostics.push(Diagnostic { kind, directive: directive.into() });
  }

  /// Consume nodes until `stop` matches a marker (left unconsumed) or input ends.
  fn block(&mut self, stop: &dyn Fn(&str) -> bool) -> Vec<AstNode> {
    let tokens = self.tokens;
    let mut nodes = Vec::new();

    while let Some(token) = tokens.get(self.pos) {
      let directive = match token {
        Token::Text(text) => {
          nodes.push(AstNode::Text(text.clone()));
          self.pos += 1;
          continue;
        }
        Token::Marker(directive) => directive.clone(),
      };
      if stop(&directive) {
        return nodes;
      }
      self.pos += 1;

      if let Some(path) = directive.strip_prefix("if:") {
        nodes.push(self.conditional(path));
      } else if let Some(path) = directive.strip_prefix("each:") {
        let body_nodes = self.block(&|d| d == "endeach");
        self.close("endeach", &directive);
        nodes.push(AstNode::Each { path: path.to_string(), body_nodes });
      } else if let Some(path) = directive.strip_prefix("match:") {
        nodes.push(self.matcher(path));
      } else if let Some(split) = directive.find(":attr:") {
        nodes.push(AstNode::Attr {
          path: directive[..split].to_string(),
          attr_name: directive[split + ":attr:".len()..].to_string(),
        });
      } else if let Some(path) = directive.strip_suffix(":html") {
        nodes.push(AstNode::Slot { path: path.to_string(), mode: SlotMode::Html });
      } else if is_close_directive(&directive) {
        self.report(DiagnosticKind::StrayClose, directive);
      } else {
        nodes.push(AstNode::Slot { path: directive, mode: SlotMode::Text });
      }
    }

    nodes
  }

  /// Consume the expected close marker, or record the opener as unclosed.
  fn close(&mut self, expected: &str, opener: &str) {
    if self.peek_marker() == Some(expected) {
      self.pos += 1;
    } else {
      self.report(DiagnosticKind::Unclosed, opener);
    }
  }

  fn conditional(&mut self, path: &str) -> AstNode {
    let endif = format!("endif:{path}");
    let then_nodes = self.block(&|d| d == "else" || d == endif);
    let else_nodes = if self.peek_marker() == Some("else") {
      self.pos += 1;
      self.block(&|d| d == endif)
    } else {
      Vec::new()
    };
    self.close(&endif, &format!("if:{path}"));
    AstNode::If { path: path.to_string(), then_nodes, else_nodes }
  }

  fn matcher(&mut self, path: &str) -> AstNode {
    let tokens = self.tokens;
    let mut branches = Vec::new();
    loop {
      match tokens.get(self.pos) {
        None => {
          self.report(DiagnosticKind::Unclosed, format!("match:{path}"));
          break;
        }
        Some(Token::Marker(d)) if d == "endmatch" => {
          self.pos += 1;
          break;
        }
        Some(Token::Marker(d)) if d.starts_with("when:") => {
          let value = d["when:".len()..].to_string();
          self.pos += 1;
          let body = self.block(&|d| d.starts_with("when:") || d == "endmatch");
          branches.push((value, body));
        }
        // Anything before the first `when:` has nowhere to render
        Some(_) => self.pos += 1,
      }
    }
    AstNode::Match { path: path.to_string(), branches }
  }
}
