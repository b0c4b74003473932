/* src/client/rust/src/env.rs */

pub const DEFAULT_MOUNT_ID: &str = "root";

/// Where the current render is happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderEnvironment {
  /// No DOM-bearing global context.
  Server,
  /// DOM present and the mount element already has children.
  Hydrating,
  /// DOM present, mount element empty or missing.
  Client,
}

impl RenderEnvironment {
  pub fn is_server(self) -> bool {
    self == Self::Server
  }

  pub fn is_client(self) -> bool {
    self == Self::Client
  }

  pub fn is_hydrating(self) -> bool {
    self == Self::Hydrating
  }

  /// Submit controls stay disabled until the view is attached, except on a
  /// cold client render. Server and hydrating output therefore agree.
  pub fn interactive_controls_enabled(self, attached: bool) -> bool {
    attached || self.is_client()
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Server => "server",
      Self::Hydrating => "hydrating",
      Self::Client => "client",
    }
  }
}

impl std::fmt::Display for RenderEnvironment {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Read-only view of the host page used by detection and bootstrap.
pub trait DomProbe {
  fn has_dom(&self) -> bool;
  fn mount_has_children(&self) -> bool;
  /// Path and query of the current page.
  fn location(&self) -> String;
}

/// Probe backed by the browser globals. Off wasm there is never a DOM.
#[derive(Debug, Clone)]
pub struct BrowserProbe {
  mount_id: String,
}

impl BrowserProbe {
  pub fn new(mount_id: impl Into<String>) -> Self {
    Self { mount_id: mount_id.into() }
  }

  pub fn mount_id(&self) -> &str {
    &self.mount_id
  }
}

impl Default for BrowserProbe {
  fn default() -> Self {
    Self::new(DEFAULT_MOUNT_ID)
  }
}

#[cfg(target_arch = "wasm32")]
impl DomProbe for BrowserProbe {
  fn has_dom(&self) -> bool {
    web_sys::window().and_then(|w| w.document()).is_some()
  }

  fn mount_has_children(&self) -> bool {
    web_sys::window()
      .and_then(|w| w.document())
      .and_then(|d| d.get_element_by_id(&self.mount_id))
      .is_some_and(|el| el.has_child_nodes())
  }

  fn location(&self) -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
      return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    format!("{path}{search}")
  }
}

#[cfg(not(target_arch = "wasm32"))]
impl DomProbe for BrowserProbe {
  fn has_dom(&self) -> bool {
    false
  }

  fn mount_has_children(&self) -> bool {
    false
  }

  fn location(&self) -> String {
    "/".to_string()
  }
}

/// Classify the current page. Only meaningful before anything is attached.
pub fn detect() -> RenderEnvironment {
  detect_with(&BrowserProbe::default())
}

pub fn detect_with(probe: &impl DomProbe) -> RenderEnvironment {
  if !probe.has_dom() {
    RenderEnvironment::Server
  } else if probe.mount_has_children() {
    RenderEnvironment::Hydrating
  } else {
    RenderEnvironment::Client
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::FakePage;

  #[test]
  fn no_dom_is_server_even_with_children() {
    let page = FakePage { dom: false, children: true, ..FakePage::default() };
    assert_eq!(detect_with(&page), RenderEnvironment::Server);
  }

  #[test]
  fn populated_mount_is_hydrating() {
    let page = FakePage { dom: true, children: true, ..FakePage::default() };
    assert_eq!(detect_with(&page), RenderEnvironment::Hydrating);
  }

  #[test]
  fn cleared_mount_is_client() {
    let mut page = FakePage { dom: true, children: true, ..FakePage::default() };
    assert!(detect_with(&page).is_hydrating());
    page.children = false;
    assert!(detect_with(&page).is_client());
  }

  #[cfg(not(target_arch = "wasm32"))]
  #[test]
  fn native_detect_is_server() {
    assert!(detect().is_server());
  }

  #[test]
  fn controls_follow_attach_state() {
    assert!(!RenderEnvironment::Server.interactive_controls_enabled(false));
    assert!(!RenderEnvironment::Hydrating.interactive_controls_enabled(false));
    assert!(RenderEnvironment::Hydrating.interactive_controls_enabled(true));
    assert!(RenderEnvironment::Client.interactive_controls_enabled(false));
  }
}
