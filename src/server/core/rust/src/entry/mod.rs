/* src/server/core/rust/src/entry/mod.rs */

mod loader;
mod manifest;
mod module;
mod native;
mod resolver;
mod route;
mod template_module;

pub use loader::{
  BoxFuture, COMPILED_ENTRY, CompiledLoader, EntryLoader, RawSourceLoader, SOURCE_ENTRY, TransformingSourceLoader,
};
pub use module::{EntryModule, Rendered, ResolvedEntry, Tier};
pub use native::{ComposedEntry, InProcessLoader};
pub use resolver::{EntryResolver, ModuleCache};
