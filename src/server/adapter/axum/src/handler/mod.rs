/* src/server/adapter/axum/src/handler/mod.rs */

mod page;

use std::sync::Arc;

use axum::Router;
use isomorph_server::{AppRoutes, IsomorphParts, RenderOrchestrator};
use tower_http::services::ServeDir;

pub(crate) struct AppState {
  pub orchestrator: Arc<RenderOrchestrator>,
  pub routes: Arc<AppRoutes>,
}

pub(crate) fn build_router(parts: IsomorphParts, static_assets: bool) -> Router {
  let mut router = Router::new();

  // Build assets per app: `/assets` for the default app, `/<prefix>/assets` otherwise
  if static_assets {
    for app in parts.routes.apps() {
      let dir = parts.render.app_dist_dir(app.as_str()).join("assets");
      let mount = match parts.routes.prefix_of(app) {
        Some(prefix) => format!("/{prefix}/assets"),
        None => "/assets".to_string(),
      };
      router = router.nest_service(&mount, ServeDir::new(dir));
    }
  }

  let state = Arc::new(AppState { orchestrator: parts.orchestrator, routes: parts.routes });
  router.fallback(page::handle_page).with_state(state)
}
