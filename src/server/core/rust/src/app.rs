/* src/server/core/rust/src/app.rs */

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::errors::ConfigError;

/// Name of one independently-built application, lower kebab-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppId(Arc<str>);

pub const HOST: &str = "host";
pub const PATIENT_PORTAL: &str = "patient-portal";

fn is_kebab(s: &str) -> bool {
  !s.is_empty()
    && !s.starts_with('-')
    && !s.ends_with('-')
    && !s.contains("--")
    && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

impl AppId {
  pub fn new(id: &str) -> Result<Self, ConfigError> {
    if is_kebab(id) { Ok(Self(Arc::from(id))) } else { Err(ConfigError::InvalidAppId(id.to_string())) }
  }

  pub fn host() -> Self {
    Self(Arc::from(HOST))
  }

  pub fn patient_portal() -> Self {
    Self(Arc::from(PATIENT_PORTAL))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for AppId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for AppId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl<'de> Deserialize<'de> for AppId {
  fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(de)?;
    Self::new(&raw).map_err(serde::de::Error::custom)
  }
}

/// Declared application: identity, shell title, optional path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppSpec {
  pub id: AppId,
  #[serde(default)]
  pub title: Option<String>,
  /// Leading path segment that selects this app; `None` marks the default app.
  #[serde(default)]
  pub prefix: Option<String>,
}

impl AppSpec {
  pub fn title(&self) -> &str {
    self.title.as_deref().unwrap_or(self.id.as_str())
  }

  /// `host` and `patient-portal`, as shipped.
  pub fn standard() -> Vec<Self> {
    vec![
      Self { id: AppId::host(), title: Some("FHIR POC".into()), prefix: None },
      Self {
        id: AppId::patient_portal(),
        title: Some("Patient Portal - FHIR POC".into()),
        prefix: Some(PATIENT_PORTAL.into()),
      },
    ]
  }
}
