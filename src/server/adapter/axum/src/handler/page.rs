/* src/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::response::{Html, IntoResponse, Response};
use isomorph_server::{RenderRequest, Route};

use super::AppState;
use crate::error::NotFound;

/// Fallback for everything not claimed by a static route.
pub(super) async fn handle_page(State(state): State<Arc<AppState>>, req: Request) -> Response {
  if req.method() != Method::GET {
    return NotFound.into_response();
  }
  let path_and_query = req.uri().path_and_query().map_or("/", |pq| pq.as_str());

  match state.routes.partition(path_and_query) {
    Route::Api => NotFound.into_response(),
    Route::App { app, url } => {
      let outcome = state.orchestrator.render(RenderRequest::new(app, url)).await;
      Html(outcome.html).into_response()
    }
  }
}
