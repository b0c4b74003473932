/* src/server/core/rust/tests/pipeline.rs */

use std::fs;
use std::path::Path;

use isomorph_server::{AppId, IsomorphServer, RenderConfig, RenderMode, RenderRequest, Route};

fn write(root: &Path, rel: &str, body: &str) {
  let path = root.join(rel);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, body).unwrap();
}

#[tokio::test]
async fn portal_request_is_partitioned_resolved_and_spliced() {
  let root = tempfile::tempdir().unwrap();
  write(root.path(), "dist/apps/patient-portal/index.html", "<body><div id=\"root\"></div></body>");
  write(
    root.path(),
    "dist/apps/patient-portal/src/entry-server.json",
    r#"{"routes":[{"path":"/patients/:id","template":"patient.html"}]}"#,
  );
  write(root.path(), "dist/apps/patient-portal/src/patient.html", "<h1><!--iso:params.id--></h1>");

  let config = RenderConfig { mode: RenderMode::Production, ..RenderConfig::default() }.rooted_at(root.path());
  let parts = IsomorphServer::new(config).into_parts().unwrap();

  let Route::App { app, url } = parts.routes.partition("/patient-portal/patients/p-1?tab=labs") else {
    panic!("expected an app route");
  };
  assert_eq!(app, AppId::patient_portal());
  assert_eq!(url, "/patients/p-1?tab=labs");

  let out = parts.orchestrator.render(RenderRequest::new(app, url)).await;
  assert!(!out.degraded);
  assert_eq!(out.html, "<body><div id=\"root\"><h1>p-1</h1></div></body>");

  // Compiled entries are cached after the first request
  assert_eq!(parts.orchestrator.resolver().cache().len(), 1);
}

#[tokio::test]
async fn api_paths_never_reach_the_orchestrator() {
  let parts = IsomorphServer::new(RenderConfig::default()).into_parts().unwrap();
  assert_eq!(parts.routes.partition("/api/fhir/Patient"), Route::Api);
}
