/* src/server/adapter/axum/src/timing.rs */

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

const SLOW: Duration = Duration::from_millis(5000);
const MODERATELY_SLOW: Duration = Duration::from_millis(2000);

/// Log every request with its duration, escalating to `warn` when slow.
pub(crate) async fn log_request(req: Request, next: Next) -> Response {
  let method = req.method().clone();
  let uri = req.uri().clone();
  let started = Instant::now();

  let response = next.run(req).await;

  let elapsed = started.elapsed();
  let status = response.status().as_u16();
  let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
  if elapsed > SLOW {
    warn!(%method, %uri, status, duration_ms, "slow request");
  } else if elapsed > MODERATELY_SLOW {
    warn!(%method, %uri, status, duration_ms, "moderately slow request");
  } else {
    debug!(%method, %uri, status, duration_ms, "request completed");
  }
  response
}
