/* src/client/rust/src/bootstrap.rs */

use std::sync::OnceLock;

use tracing::debug;

use crate::compose::{Compose, ComposeContext};
use crate::env::{DomProbe, RenderEnvironment, detect_with};
use crate::view::View;

#[derive(Debug, thiserror::Error)]
pub enum BootError {
  #[error("no DOM available, nothing to boot")]
  NoDom,
  #[error("mount failed: {0}")]
  Mount(String),
}

/// Attaches a composed view to the mount element.
pub trait Mounter {
  /// Adopt the server-rendered children in place. The view must describe
  /// the same structure; differences are not reconciled.
  fn hydrate(&mut self, view: View) -> Result<(), BootError>;
  /// Replace whatever the mount holds with a fresh render of `view`.
  fn render(&mut self, view: View) -> Result<(), BootError>;
  /// Apply the post-attach composition after a hydrate, e.g. enabling
  /// controls that were rendered disabled.
  fn activate(&mut self, view: View) -> Result<(), BootError> {
    self.render(view)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boot {
  pub environment: RenderEnvironment,
}

static BOOT_ENVIRONMENT: OnceLock<RenderEnvironment> = OnceLock::new();

/// Environment captured by the first successful bootstrap on this page.
pub fn boot_environment() -> Option<RenderEnvironment> {
  BOOT_ENVIRONMENT.get().copied()
}

/// Detect once, publish, compose, then hydrate or cold-render.
pub fn bootstrap(
  app: &impl Compose,
  mounter: &mut impl Mounter,
  probe: &impl DomProbe,
) -> Result<Boot, BootError> {
  let environment = detect_with(probe);
  if environment.is_server() {
    return Err(BootError::NoDom);
  }
  if BOOT_ENVIRONMENT.set(environment).is_err() {
    debug!(%environment, "boot environment already published, keeping first");
  }

  let ctx = ComposeContext::new(probe.location(), environment);
  let view = app.compose(&ctx);
  match environment {
    RenderEnvironment::Hydrating => {
      mounter.hydrate(view)?;
      let live = ctx.clone().after_attach();
      mounter.activate(app.compose(&live))?;
    }
    _ => mounter.render(view)?,
  }
  debug!(%environment, url = %ctx.url, "app attached");
  Ok(Boot { environment })
}

/// Mounter for the live document.
#[cfg(target_arch = "wasm32")]
pub struct DomMounter {
  mount_id: String,
}

#[cfg(target_arch = "wasm32")]
impl DomMounter {
  pub fn new(mount_id: impl Into<String>) -> Self {
    Self { mount_id: mount_id.into() }
  }

  fn element(&self) -> Result<web_sys::Element, BootError> {
    web_sys::window()
      .and_then(|w| w.document())
      .ok_or(BootError::NoDom)?
      .get_element_by_id(&self.mount_id)
      .ok_or_else(|| BootError::Mount(format!("no element with id \"{}\"", self.mount_id)))
  }
}

#[cfg(target_arch = "wasm32")]
impl Mounter for DomMounter {
  fn hydrate(&mut self, view: View) -> Result<(), BootError> {
    use crate::view::RenderToString;
    let el = self.element()?;
    if el.inner_html() != view.render_to_string() {
      tracing::warn!(mount = %self.mount_id, "hydrated markup differs from composed view");
    }
    Ok(())
  }

  fn render(&mut self, view: View) -> Result<(), BootError> {
    use crate::view::RenderToString;
    self.element()?.set_inner_html(&view.render_to_string());
    Ok(())
  }
}
