/* src/server/injector/rust/src/lib.rs */

//! Slot templates for isomorph entry modules.
//!
//! Directives live in HTML comments so an unrendered template is still valid
//! markup: `<!--iso:path-->` (escaped text), `<!--iso:path:html-->` (raw),
//! `<!--iso:path:attr:name-->` (attribute on the next tag), and the block
//! forms `if:`/`else`/`endif:`, `each:`/`endeach`, `match:`/`when:`/`endmatch`.

mod ast;
mod helpers;
mod parser;
mod render;
mod token;

pub use helpers::escape_html;
pub use parser::{Diagnostic, DiagnosticKind};

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use ast::AstNode;
use render::{RenderContext, attach_attrs, render};
use token::tokenize;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  #[error("stray block marker <!--iso:{0}-->")]
  StrayClose(String),
  #[error("block <!--iso:{0}--> is never closed")]
  Unclosed(String),
}

impl From<Diagnostic> for TemplateError {
  fn from(d: Diagnostic) -> Self {
    match d.kind {
      DiagnosticKind::StrayClose => Self::StrayClose(d.directive),
      DiagnosticKind::Unclosed => Self::Unclosed(d.directive),
    }
  }
}

/// A parsed template, reusable across renders.
pub struct Template {
  nodes: Vec<AstNode>,
  diagnostics: Vec<Diagnostic>,
}

impl fmt::Debug for Template {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Template")
      .field("nodes", &self.nodes.len())
      .field("diagnostics", &self.diagnostics)
      .finish()
  }
}

impl Template {
  /// Parse, rejecting unbalanced or stray block markers.
  pub fn compile(source: &str) -> Result<Self, TemplateError> {
    let mut template = Self::compile_lenient(source);
    let first = template.diagnostics.drain(..).next();
    match first {
      Some(first) => Err(first.into()),
      None => Ok(template),
    }
  }

  /// Parse without rejecting anything. Stray closers are dropped and
  /// unclosed blocks run to the end of the template.
  pub fn compile_lenient(source: &str) -> Self {
    // NUL is reserved for attribute markers and never valid in HTML
    let clean: Cow<'_, str> =
      if source.contains('\0') { Cow::Owned(source.replace('\0', "")) } else { Cow::Borrowed(source) };
    let (nodes, diagnostics) = parser::parse(&tokenize(&clean));
    Self { nodes, diagnostics }
  }

  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  pub fn render(&self, data: &Value) -> String {
    let mut ctx = RenderContext::default();
    let out = render(&self.nodes, data, &mut ctx);
    if ctx.attrs.is_empty() { out } else { attach_attrs(out, &ctx.attrs) }
  }
}

/// One-shot lenient render.
pub fn inject(template: &str, data: &Value) -> String {
  Template::compile_lenient(template).render(data)
}
