/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Plain-text 404 for API paths and non-GET requests.
pub(crate) struct NotFound;

impl IntoResponse for NotFound {
  fn into_response(self) -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
  }
}
