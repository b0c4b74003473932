/* src/client/rust/src/lib.rs */

//! Browser side of an isomorph app: decide whether the page arrived
//! server-rendered, then hydrate it or render from scratch.

mod bootstrap;
mod compose;
mod env;
mod view;

#[cfg(test)]
mod testing;

pub use bootstrap::{Boot, BootError, Mounter, boot_environment, bootstrap};
#[cfg(target_arch = "wasm32")]
pub use bootstrap::DomMounter;
pub use compose::{Compose, ComposeContext};
pub use env::{BrowserProbe, DEFAULT_MOUNT_ID, DomProbe, RenderEnvironment, detect, detect_with};
pub use view::{Element, RenderToString, View};
