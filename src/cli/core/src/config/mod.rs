/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{apply_env, resolve_config};
pub use types::IsomorphConfig;
