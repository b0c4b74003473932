/* src/server/core/rust/src/lib.rs */

//! Server core for isomorph: pick the app for a request, resolve its entry
//! module through the loader chain, render, and splice the markup into the
//! app's HTML shell.

pub mod app;
pub mod config;
pub mod entry;
pub mod errors;
pub mod render;
pub mod routing;
pub mod server;
pub mod template;

pub use app::{AppId, AppSpec};
pub use config::{RenderConfig, RenderMode};
pub use entry::{
  BoxFuture, CompiledLoader, ComposedEntry, EntryLoader, EntryModule, EntryResolver, InProcessLoader, ModuleCache,
  RawSourceLoader, Rendered, ResolvedEntry, Tier, TransformingSourceLoader,
};
pub use errors::{Attempt, ConfigError, LoadError, RenderInvocationError, ResolutionError, TemplateReadError};
pub use render::{RenderOrchestrator, RenderOutcome, RenderRequest};
pub use routing::{AppRoutes, Route};
pub use server::{IsomorphParts, IsomorphServer};
pub use template::{TemplateDocument, TemplateStore, TemplateTier};
