//! App Store Connect API: JSON:API payload types, client trait and HTTP client

use super::http::HttpClient;
use crate::core::error::{DeckResult, ResultExt};
use crate::release::model::Store;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.appstoreconnect.apple.com";

/// Largest page App Store Connect serves for a collection
pub const MAX_PAGE: usize = 200;

/// Beta review state of a build cleared for external testers
pub const BETA_APPROVED: &str = "APPROVED";

/// Build processing state before the build becomes usable
pub const PROCESSING: &str = "PROCESSING";

/// `appStoreVersions` collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppStoreVersionsDocument {
  #[serde(default)]
  pub data: Vec<AppStoreVersion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppStoreVersion {
  pub id: String,
  #[serde(default)]
  pub attributes: AppStoreVersionAttributes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreVersionAttributes {
  #[serde(default)]
  pub version_string: Option<String>,
  #[serde(default)]
  pub app_store_state: Option<String>,
  /// Newer replacement for `appStoreState`
  #[serde(default)]
  pub app_version_state: Option<String>,
  /// IOS, MAC_OS, TV_OS, VISION_OS
  #[serde(default)]
  pub platform: Option<String>,
}

impl AppStoreVersion {
  pub fn state(&self) -> Option<&str> {
    self
      .attributes
      .app_store_state
      .as_deref()
      .or(self.attributes.app_version_state.as_deref())
  }
}

/// `builds` collection with its included relations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildsDocument {
  #[serde(default)]
  pub data: Vec<Build>,
  #[serde(default)]
  pub included: Vec<Included>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Build {
  pub id: String,
  #[serde(default)]
  pub attributes: BuildAttributes,
  #[serde(default)]
  pub relationships: BuildRelationships,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAttributes {
  /// Build number (CFBundleVersion)
  #[serde(default)]
  pub version: Option<String>,
  #[serde(default)]
  pub processing_state: Option<String>,
  #[serde(default)]
  pub uploaded_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRelationships {
  #[serde(default)]
  pub pre_release_version: Option<Relationship>,
  #[serde(default)]
  pub beta_app_review_submission: Option<Relationship>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationship {
  #[serde(default)]
  pub data: Option<ResourceRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRef {
  #[serde(rename = "type")]
  pub kind: String,
  pub id: String,
}

/// Included resources we resolve; everything else is ignored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Included {
  #[serde(rename = "preReleaseVersions")]
  PreReleaseVersion {
    id: String,
    #[serde(default)]
    attributes: PreReleaseVersionAttributes,
  },
  #[serde(rename = "betaAppReviewSubmissions")]
  BetaAppReviewSubmission {
    id: String,
    #[serde(default)]
    attributes: BetaAppReviewSubmissionAttributes,
  },
  #[serde(other)]
  Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreReleaseVersionAttributes {
  /// Marketing version (CFBundleShortVersionString)
  #[serde(default)]
  pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaAppReviewSubmissionAttributes {
  #[serde(default)]
  pub beta_review_state: Option<String>,
}

/// A build with its relations resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSnapshot {
  pub id: String,
  pub build_number: String,
  pub processing_state: Option<String>,
  pub marketing_version: Option<String>,
  pub beta_review_state: Option<String>,
}

impl BuildSnapshot {
  pub fn is_processing(&self) -> bool {
    self.processing_state.as_deref() == Some(PROCESSING)
  }
}

impl BuildsDocument {
  /// Resolve the first (most recent) build in the document
  pub fn latest(&self) -> Option<BuildSnapshot> {
    self.data.first().map(|build| self.snapshot(build))
  }

  /// Resolve a build's pre-release version and beta review submission
  pub fn snapshot(&self, build: &Build) -> BuildSnapshot {
    let pre_release_id = build
      .relationships
      .pre_release_version
      .as_ref()
      .and_then(|r| r.data.as_ref())
      .map(|r| r.id.as_str());
    let submission_id = build
      .relationships
      .beta_app_review_submission
      .as_ref()
      .and_then(|r| r.data.as_ref())
      .map(|r| r.id.as_str());

    let mut marketing_version = None;
    let mut beta_review_state = None;
    for item in &self.included {
      match item {
        Included::PreReleaseVersion { id, attributes } if Some(id.as_str()) == pre_release_id => {
          marketing_version = attributes.version.clone();
        }
        Included::BetaAppReviewSubmission { id, attributes } if Some(id.as_str()) == submission_id => {
          beta_review_state = attributes.beta_review_state.clone();
        }
        _ => {}
      }
    }

    BuildSnapshot {
      id: build.id.clone(),
      build_number: build.attributes.version.clone().unwrap_or_default(),
      processing_state: build.attributes.processing_state.clone(),
      marketing_version: marketing_version.filter(|v| !v.is_empty()),
      beta_review_state,
    }
  }
}

/// `customerReviews` collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerReviewsDocument {
  #[serde(default)]
  pub data: Vec<CustomerReview>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerReview {
  pub id: String,
  #[serde(default)]
  pub attributes: CustomerReviewAttributes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReviewAttributes {
  #[serde(default)]
  pub rating: Option<i64>,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub body: Option<String>,
  #[serde(default)]
  pub reviewer_nickname: Option<String>,
  #[serde(default)]
  pub created_date: Option<String>,
}

/// `apps` collection visible to the API key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppsDocument {
  #[serde(default)]
  pub data: Vec<App>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct App {
  pub id: String,
  #[serde(default)]
  pub attributes: AppAttributes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAttributes {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub bundle_id: Option<String>,
}

/// Query for `GET /v1/apps/{id}/appStoreVersions`
#[derive(Debug, Clone)]
pub struct VersionQuery<'a> {
  pub app_id: &'a str,
  /// Platform codes; empty means all platforms
  pub platforms: &'a [String],
  pub limit: usize,
}

/// Query for `GET /v1/builds`, newest upload first
#[derive(Debug, Clone)]
pub struct BuildQuery<'a> {
  pub app_id: &'a str,
  pub beta_review_state: Option<&'a str>,
  pub limit: usize,
}

/// Read operations of App Store Connect used by the dashboard
pub trait AppStoreConnectApi: Sync {
  fn app_store_versions(&self, query: &VersionQuery<'_>) -> DeckResult<AppStoreVersionsDocument>;

  fn builds(&self, query: &BuildQuery<'_>) -> DeckResult<BuildsDocument>;

  fn customer_reviews(&self, app_id: &str, limit: usize) -> DeckResult<CustomerReviewsDocument>;

  /// Apps the key can see, for filling in `app_id` in the config
  fn apps(&self, limit: usize) -> DeckResult<AppsDocument>;
}

fn page_size(limit: usize) -> String {
  limit.clamp(1, MAX_PAGE).to_string()
}

/// Live client; the bearer token is a pre-signed App Store Connect JWT
pub struct AppStoreConnectClient {
  http: HttpClient,
}

impl AppStoreConnectClient {
  pub fn new(base_url: &str, token: String, timeout: Duration) -> Self {
    Self {
      http: HttpClient::new(Store::Apple, base_url, token, timeout),
    }
  }
}

impl AppStoreConnectApi for AppStoreConnectClient {
  fn app_store_versions(&self, query: &VersionQuery<'_>) -> DeckResult<AppStoreVersionsDocument> {
    let path = format!("/v1/apps/{}/appStoreVersions", query.app_id);
    let mut params = vec![("limit", page_size(query.limit)), ("include", "build".to_string())];
    if !query.platforms.is_empty() {
      params.push(("filter[platform]", query.platforms.join(",")));
    }
    self
      .http
      .get_json(&path, &params)
      .context("Failed to fetch app store versions")
  }

  fn builds(&self, query: &BuildQuery<'_>) -> DeckResult<BuildsDocument> {
    let mut params = vec![
      ("filter[app]", query.app_id.to_string()),
      ("sort", "-uploadedDate".to_string()),
      ("limit", page_size(query.limit)),
      ("include", "preReleaseVersion,betaAppReviewSubmission".to_string()),
    ];
    if let Some(state) = query.beta_review_state {
      params.push(("filter[betaAppReviewSubmission.betaReviewState]", state.to_string()));
    }
    self.http.get_json("/v1/builds", &params).context("Failed to fetch builds")
  }

  fn customer_reviews(&self, app_id: &str, limit: usize) -> DeckResult<CustomerReviewsDocument> {
    let path = format!("/v1/apps/{}/customerReviews", app_id);
    let params = [("sort", "-createdDate".to_string()), ("limit", page_size(limit))];
    self
      .http
      .get_json(&path, &params)
      .context("Failed to fetch customer reviews")
  }

  fn apps(&self, limit: usize) -> DeckResult<AppsDocument> {
    let params = [
      ("fields[apps]", "name,bundleId".to_string()),
      ("sort", "name".to_string()),
      ("limit", page_size(limit)),
    ];
    self.http.get_json("/v1/apps", &params).context("Failed to list apps")
  }
}
