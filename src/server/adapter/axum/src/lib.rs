/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;
mod timing;

use isomorph_server::{ConfigError, IsomorphServer};
use tracing::info;

/// Re-export isomorph-server core for convenience
pub use isomorph_server;

/// Extension trait that converts an `IsomorphServer` into an Axum router.
pub trait IntoAxumRouter {
  /// Every GET not claimed by static assets goes through the render pipeline.
  fn into_axum_router(self, static_assets: bool) -> Result<axum::Router, ConfigError>;
}

impl IntoAxumRouter for IsomorphServer {
  fn into_axum_router(self, static_assets: bool) -> Result<axum::Router, ConfigError> {
    let parts = self.into_parts()?;
    Ok(handler::build_router(parts, static_assets).layer(axum::middleware::from_fn(timing::log_request)))
  }
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(router: axum::Router, addr: &str) -> std::io::Result<()> {
  let listener = tokio::net::TcpListener::bind(addr).await?;
  let local_addr = listener.local_addr()?;
  info!(port = local_addr.port(), "isomorph server running on http://localhost:{}", local_addr.port());
  axum::serve(listener, router).await
}
