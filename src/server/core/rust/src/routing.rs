/* src/server/core/rust/src/routing.rs */

use std::collections::HashSet;

use crate::app::{AppId, AppSpec};
use crate::errors::ConfigError;

/// Where an incoming path belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  /// Reserved for the API surface; never rendered.
  Api,
  App { app: AppId, url: String },
}

/// Maps request paths to apps by leading segment.
#[derive(Debug, Clone)]
pub struct AppRoutes {
  default_app: AppId,
  prefixed: Vec<(String, AppId)>,
  api_prefix: String,
}

fn is_segment(s: &str) -> bool {
  !s.is_empty() && !s.contains(['/', '?', '#'])
}

/// `/api/` and `api` both become `/api`.
fn normalize_prefix(prefix: &str) -> String {
  format!("/{}", prefix.trim_matches('/'))
}

fn under(path: &str, prefix: &str) -> bool {
  path.strip_prefix(prefix).is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

impl AppRoutes {
  pub fn new(apps: &[AppSpec], api_prefix: &str) -> Result<Self, ConfigError> {
    let mut ids = HashSet::new();
    let mut prefixes = HashSet::new();
    let mut defaults = Vec::new();
    let mut prefixed = Vec::new();

    for spec in apps {
      if !ids.insert(spec.id.clone()) {
        return Err(ConfigError::DuplicateApp(spec.id.to_string()));
      }
      match &spec.prefix {
        None => defaults.push(spec.id.clone()),
        Some(prefix) => {
          let segment = prefix.trim_matches('/');
          if !is_segment(segment) {
            return Err(ConfigError::InvalidPrefix(prefix.clone()));
          }
          if !prefixes.insert(segment.to_string()) {
            return Err(ConfigError::DuplicatePrefix(segment.to_string()));
          }
          prefixed.push((segment.to_string(), spec.id.clone()));
        }
      }
    }

    let found = defaults.len();
    let default_app = match <[AppId; 1]>::try_from(defaults) {
      Ok([only]) => only,
      Err(_) => return Err(ConfigError::DefaultApp { found }),
    };
    Ok(Self { default_app, prefixed, api_prefix: normalize_prefix(api_prefix) })
  }

  /// `host` by default, `patient-portal` under `/patient-portal`, API at `/api`.
  pub fn standard() -> Self {
    Self {
      default_app: AppId::host(),
      prefixed: vec![(crate::app::PATIENT_PORTAL.to_string(), AppId::patient_portal())],
      api_prefix: "/api".to_string(),
    }
  }

  pub fn default_app(&self) -> &AppId {
    &self.default_app
  }

  pub fn api_prefix(&self) -> &str {
    &self.api_prefix
  }

  pub fn prefix_of(&self, app: &AppId) -> Option<&str> {
    self.prefixed.iter().find(|(_, id)| id == app).map(|(p, _)| p.as_str())
  }

  pub fn apps(&self) -> impl Iterator<Item = &AppId> {
    std::iter::once(&self.default_app).chain(self.prefixed.iter().map(|(_, id)| id))
  }

  pub fn partition(&self, path_and_query: &str) -> Route {
    let (path, query) = match path_and_query.find('?') {
      Some(i) => path_and_query.split_at(i),
      None => (path_and_query, ""),
    };
    // `//api/x` must not slip past the API check
    let path = format!("/{}", path.trim_start_matches('/'));
    let path = path.as_str();

    if under(path, &self.api_prefix) {
      return Route::Api;
    }

    let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
    if let Some((prefix, app)) = self.prefixed.iter().find(|(p, _)| p == first) {
      let rest = &path.trim_start_matches('/')[prefix.len()..];
      let rest = if rest.is_empty() { "/" } else { rest };
      return Route::App { app: app.clone(), url: format!("{rest}{query}") };
    }

    Route::App { app: self.default_app.clone(), url: format!("{path}{query}") }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn app_route(routes: &AppRoutes, input: &str) -> (String, String) {
    match routes.partition(input) {
      Route::App { app, url } => (app.to_string(), url),
      Route::Api => panic!("{input} routed to api"),
    }
  }

  #[test]
  fn api_paths() {
    let r = AppRoutes::standard();
    for p in ["/api", "/api/", "/api/fhir/Patient", "/api?x=1"] {
      assert_eq!(r.partition(p), Route::Api, "{p}");
    }
  }

  #[test]
  fn repeated_leading_slashes_still_hit_api() {
    let r = AppRoutes::standard();
    for p in ["//api/fhir/Patient", "///api", "//api?x=1"] {
      assert_eq!(r.partition(p), Route::Api, "{p}");
    }
    assert_eq!(app_route(&r, "//patient-portal//x"), ("patient-portal".into(), "//x".into()));
  }

  #[test]
  fn api_match_is_segment_wise() {
    let r = AppRoutes::standard();
    assert_eq!(app_route(&r, "/apiary"), ("host".into(), "/apiary".into()));
  }

  #[test]
  fn portal_prefix_is_stripped() {
    let r = AppRoutes::standard();
    assert_eq!(app_route(&r, "/patient-portal/dashboard"), ("patient-portal".into(), "/dashboard".into()));
    assert_eq!(app_route(&r, "/patient-portal"), ("patient-portal".into(), "/".into()));
    assert_eq!(app_route(&r, "/patient-portal/"), ("patient-portal".into(), "/".into()));
    assert_eq!(app_route(&r, "/patient-portal?tab=1"), ("patient-portal".into(), "/?tab=1".into()));
    assert_eq!(app_route(&r, "/patient-portal/a/b?x=y"), ("patient-portal".into(), "/a/b?x=y".into()));
  }

  #[test]
  fn everything_else_goes_to_default() {
    let r = AppRoutes::standard();
    assert_eq!(app_route(&r, "/"), ("host".into(), "/".into()));
    assert_eq!(app_route(&r, ""), ("host".into(), "/".into()));
    assert_eq!(app_route(&r, "/login?next=/x"), ("host".into(), "/login?next=/x".into()));
    assert_eq!(app_route(&r, "/patient-portalx"), ("host".into(), "/patient-portalx".into()));
  }

  #[test]
  fn standard_matches_standard_specs() {
    let built = AppRoutes::new(&AppSpec::standard(), "/api").unwrap();
    let std = AppRoutes::standard();
    assert_eq!(built.default_app(), std.default_app());
    assert_eq!(built.prefix_of(&AppId::patient_portal()), Some("patient-portal"));
    assert_eq!(built.apps().count(), 2);
  }

  #[test]
  fn custom_api_prefix_is_normalized() {
    let r = AppRoutes::new(&AppSpec::standard(), "backend/").unwrap();
    assert_eq!(r.api_prefix(), "/backend");
    assert_eq!(r.partition("/backend/x"), Route::Api);
    assert!(matches!(r.partition("/api/x"), Route::App { .. }));
  }

  #[test]
  fn validation() {
    let spec = |id: &str, prefix: Option<&str>| AppSpec {
      id: AppId::new(id).unwrap(),
      title: None,
      prefix: prefix.map(str::to_string),
    };
    assert_eq!(
      AppRoutes::new(&[spec("a", None), spec("a", Some("x"))], "/api").unwrap_err(),
      ConfigError::DuplicateApp("a".into())
    );
    assert_eq!(
      AppRoutes::new(&[spec("a", None), spec("b", None)], "/api").unwrap_err(),
      ConfigError::DefaultApp { found: 2 }
    );
    assert_eq!(AppRoutes::new(&[spec("a", Some("a"))], "/api").unwrap_err(), ConfigError::DefaultApp { found: 0 });
    assert_eq!(
      AppRoutes::new(&[spec("a", None), spec("b", Some("x")), spec("c", Some("/x/"))], "/api").unwrap_err(),
      ConfigError::DuplicatePrefix("x".into())
    );
    assert_eq!(
      AppRoutes::new(&[spec("a", None), spec("b", Some("x/y"))], "/api").unwrap_err(),
      ConfigError::InvalidPrefix("x/y".into())
    );
  }
}
