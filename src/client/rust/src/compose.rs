/* src/client/rust/src/compose.rs */

use crate::env::RenderEnvironment;
use crate::view::View;

/// Inputs to one composition of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeContext {
  /// Path and query, already stripped of any app prefix.
  pub url: String,
  pub environment: RenderEnvironment,
  /// The view is already live in the document.
  pub attached: bool,
}

impl ComposeContext {
  pub fn new(url: impl Into<String>, environment: RenderEnvironment) -> Self {
    Self { url: url.into(), environment, attached: false }
  }

  pub fn after_attach(mut self) -> Self {
    self.attached = true;
    self
  }

  /// Off until attach, except on a cold client render. Server and hydrating
  /// compositions therefore produce the same markup.
  pub fn controls_enabled(&self) -> bool {
    self.environment.interactive_controls_enabled(self.attached)
  }
}

/// An application's view composition. The server entry and the browser
/// bootstrap call the same implementation so hydration sees the same tree.
pub trait Compose: Send + Sync {
  fn compose(&self, ctx: &ComposeContext) -> View;
}

impl<F> Compose for F
where
  F: Fn(&ComposeContext) -> View + Send + Sync,
{
  fn compose(&self, ctx: &ComposeContext) -> View {
    self(ctx)
  }
}
