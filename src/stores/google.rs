//! Google Play Developer API: payload types, client trait and HTTP client
//!
//! Track data is only reachable through an edit transaction: open an edit,
//! read or stage track changes under its id, then commit or delete it.

use super::http::HttpClient;
use crate::core::error::{DeckResult, ResultExt};
use crate::release::model::Store;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://androidpublisher.googleapis.com";

/// `edits.insert` response
#[derive(Debug, Clone, Deserialize)]
pub struct AppEdit {
  pub id: String,
}

/// `edits.tracks.list` response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TracksListResponse {
  #[serde(default)]
  pub tracks: Vec<Track>,
}

/// A track and its releases, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Track {
  #[serde(default)]
  pub track: String,
  #[serde(default)]
  pub releases: Vec<TrackRelease>,
}

/// One release on a track
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackRelease {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// int64 build numbers, string-encoded on the wire
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub version_codes: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_fraction: Option<f64>,
}

/// `reviews.list` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewsListResponse {
  #[serde(default)]
  pub reviews: Vec<GoogleReview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleReview {
  pub review_id: String,
  #[serde(default)]
  pub author_name: Option<String>,
  #[serde(default)]
  pub comments: Vec<ReviewComment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewComment {
  #[serde(default)]
  pub user_comment: Option<UserComment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserComment {
  #[serde(default)]
  pub text: Option<String>,
  #[serde(default)]
  pub star_rating: Option<i64>,
  #[serde(default)]
  pub last_modified: Option<Timestamp>,
}

/// Protobuf timestamp; `seconds` arrives as a string or a number
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Timestamp {
  #[serde(default)]
  pub seconds: Option<Int64>,
  #[serde(default)]
  pub nanos: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Int64 {
  Number(i64),
  Text(String),
}

impl Int64 {
  pub fn value(&self) -> Option<i64> {
    match self {
      Int64::Number(n) => Some(*n),
      Int64::Text(s) => s.trim().parse().ok(),
    }
  }
}

/// Edit-transaction operations of the Play publishing API
pub trait GooglePlayApi: Sync {
  /// Open an edit and return its id
  fn insert_edit(&self, package_name: &str) -> DeckResult<String>;

  /// All tracks visible in the edit
  fn list_tracks(&self, package_name: &str, edit_id: &str) -> DeckResult<Vec<Track>>;

  /// A single track; an untouched standard track has no releases
  fn get_track(&self, package_name: &str, edit_id: &str, track: &str) -> DeckResult<Track>;

  /// Stage a track's release list
  fn update_track(&self, package_name: &str, edit_id: &str, track: &Track) -> DeckResult<()>;

  fn commit_edit(&self, package_name: &str, edit_id: &str) -> DeckResult<()>;

  fn delete_edit(&self, package_name: &str, edit_id: &str) -> DeckResult<()>;

  /// Most recent reviews
  fn list_reviews(&self, package_name: &str, limit: usize) -> DeckResult<Vec<GoogleReview>>;
}

/// Live client for androidpublisher v3
pub struct GooglePlayClient {
  http: HttpClient,
}

impl GooglePlayClient {
  pub fn new(base_url: &str, token: String, timeout: Duration) -> Self {
    Self {
      http: HttpClient::new(Store::Google, base_url, token, timeout),
    }
  }

  fn edit_path(package_name: &str, edit_id: &str) -> String {
    format!("/androidpublisher/v3/applications/{}/edits/{}", package_name, edit_id)
  }
}

impl GooglePlayApi for GooglePlayClient {
  fn insert_edit(&self, package_name: &str) -> DeckResult<String> {
    let path = format!("/androidpublisher/v3/applications/{}/edits", package_name);
    let edit: AppEdit = self
      .http
      .send_json::<(), _>("POST", &path, None)
      .context("Failed to open edit")?;
    Ok(edit.id)
  }

  fn list_tracks(&self, package_name: &str, edit_id: &str) -> DeckResult<Vec<Track>> {
    let path = format!("{}/tracks", Self::edit_path(package_name, edit_id));
    let response: TracksListResponse = self.http.get_json(&path, &[]).context("Failed to list tracks")?;
    Ok(response.tracks)
  }

  fn get_track(&self, package_name: &str, edit_id: &str, track: &str) -> DeckResult<Track> {
    let path = format!("{}/tracks/{}", Self::edit_path(package_name, edit_id), track);
    self
      .http
      .get_json(&path, &[])
      .with_context(|| format!("Failed to read track '{}'", track))
  }

  fn update_track(&self, package_name: &str, edit_id: &str, track: &Track) -> DeckResult<()> {
    let path = format!("{}/tracks/{}", Self::edit_path(package_name, edit_id), track.track);
    let _: Track = self
      .http
      .send_json("PUT", &path, Some(track))
      .with_context(|| format!("Failed to update track '{}'", track.track))?;
    Ok(())
  }

  fn commit_edit(&self, package_name: &str, edit_id: &str) -> DeckResult<()> {
    let path = format!("{}:commit", Self::edit_path(package_name, edit_id));
    let _: AppEdit = self
      .http
      .send_json::<(), _>("POST", &path, None)
      .context("Failed to commit edit")?;
    Ok(())
  }

  fn delete_edit(&self, package_name: &str, edit_id: &str) -> DeckResult<()> {
    self
      .http
      .delete(&Self::edit_path(package_name, edit_id))
      .context("Failed to delete edit")
  }

  fn list_reviews(&self, package_name: &str, limit: usize) -> DeckResult<Vec<GoogleReview>> {
    let path = format!("/androidpublisher/v3/applications/{}/reviews", package_name);
    let response: ReviewsListResponse = self
      .http
      .get_json(&path, &[("maxResults", limit.to_string())])
      .context("Failed to list reviews")?;
    Ok(response.reviews)
  }
}
