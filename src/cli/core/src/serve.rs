/* src/cli/core/src/serve.rs */

use std::path::Path;

use anyhow::{Context, Result};
use isomorph_server::IsomorphServer;
use isomorph_server_axum::IntoAxumRouter;
use tracing::info;

use crate::config::IsomorphConfig;

pub(crate) fn build_server(base: &Path, config: &IsomorphConfig) -> IsomorphServer {
  IsomorphServer::new(config.render_config(base))
    .apps(config.apps.clone())
    .api_prefix(config.server.api_prefix.clone())
}

pub async fn run(base: &Path, config: &IsomorphConfig, port: Option<u16>) -> Result<()> {
  let port = port.unwrap_or(config.server.port);
  let render = config.render_config(base);
  info!(
    mode = ?render.mode,
    dist_root = %render.dist_root.display(),
    source_root = %render.source_root.display(),
    "starting"
  );

  let router =
    build_server(base, config).into_axum_router(config.server.static_assets).context("invalid app configuration")?;
  let addr = format!("0.0.0.0:{port}");
  isomorph_server_axum::serve(router, &addr).await.with_context(|| format!("failed to serve on {addr}"))
}
