/* src/client/rust/src/testing.rs */

use crate::bootstrap::{BootError, Mounter};
use crate::env::DomProbe;
use crate::view::View;

#[derive(Debug, Default)]
pub(crate) struct FakePage {
  pub dom: bool,
  pub children: bool,
  pub url: String,
}

impl DomProbe for FakePage {
  fn has_dom(&self) -> bool {
    self.dom
  }

  fn mount_has_children(&self) -> bool {
    self.children
  }

  fn location(&self) -> String {
    self.url.clone()
  }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingMounter {
  pub hydrated: Vec<View>,
  pub rendered: Vec<View>,
  pub activated: Vec<View>,
}

impl Mounter for RecordingMounter {
  fn hydrate(&mut self, view: View) -> Result<(), BootError> {
    self.hydrated.push(view);
    Ok(())
  }

  fn render(&mut self, view: View) -> Result<(), BootError> {
    self.rendered.push(view);
    Ok(())
  }

  fn activate(&mut self, view: View) -> Result<(), BootError> {
    self.activated.push(view);
    Ok(())
  }
}
