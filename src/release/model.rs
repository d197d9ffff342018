//! Normalized release model shared by both stores
//!
//! A `Release` is built fresh on every fetch and never mutated afterwards;
//! filtering and promotion produce new lists instead of editing entries.

use serde::Serialize;
use std::fmt;

/// Fallback version when a store reports nothing usable
pub const UNKNOWN_VERSION: &str = "unknown";

/// Which store a release or review came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Store {
  Google,
  Apple,
}

impl fmt::Display for Store {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Store::Google => write!(f, "google"),
      Store::Apple => write!(f, "apple"),
    }
  }
}

/// Normalized release health; the only status field logic may branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
  Live,
  Review,
  Pending,
  Issue,
  Draft,
}

impl StatusCategory {
  pub fn as_str(&self) -> &'static str {
    match self {
      StatusCategory::Live => "live",
      StatusCategory::Review => "review",
      StatusCategory::Pending => "pending",
      StatusCategory::Issue => "issue",
      StatusCategory::Draft => "draft",
    }
  }
}

impl fmt::Display for StatusCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Display label paired with its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabel {
  pub label: String,
  pub category: StatusCategory,
}

impl StatusLabel {
  pub fn new(label: impl Into<String>, category: StatusCategory) -> Self {
    Self {
      label: label.into(),
      category,
    }
  }
}

/// A single normalized release on one track or platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
  store: Store,
  version: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  version_code: Option<String>,
  track: String,
  status: String,
  status_category: StatusCategory,
}

impl Release {
  /// Build a release; an empty version becomes `"unknown"`
  pub fn new(store: Store, version: impl Into<String>, track: impl Into<String>, status: StatusLabel) -> Self {
    let version = version.into();
    let version = if version.trim().is_empty() {
      UNKNOWN_VERSION.to_string()
    } else {
      version
    };

    Self {
      store,
      version,
      version_code: None,
      track: track.into(),
      status: status.label,
      status_category: status.category,
    }
  }

  /// Attach an internal build number
  pub fn with_version_code(mut self, code: impl Into<String>) -> Self {
    self.version_code = Some(code.into());
    self
  }

  pub fn store(&self) -> Store {
    self.store
  }

  pub fn version(&self) -> &str {
    &self.version
  }

  pub fn version_code(&self) -> Option<&str> {
    self.version_code.as_deref()
  }

  pub fn track(&self) -> &str {
    &self.track
  }

  pub fn status(&self) -> &str {
    &self.status
  }

  pub fn status_category(&self) -> StatusCategory {
    self.status_category
  }

  pub fn is_draft(&self) -> bool {
    self.status_category == StatusCategory::Draft
  }

  pub fn is_live(&self) -> bool {
    self.status_category == StatusCategory::Live
  }
}
