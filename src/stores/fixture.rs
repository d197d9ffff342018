//! Offline store backed by JSON files on disk
//!
//! Layout under the fixture root:
//!
//! ```text
//! google/<package>/tracks.json      tracks.list body (required)
//! google/<package>/reviews.json     reviews.list body
//! apple/<appId>/versions.json       appStoreVersions document (required)
//! apple/<appId>/latest_build.json   builds document
//! apple/<appId>/approved_build.json builds document
//! apple/<appId>/reviews.json        customerReviews document
//! apple/apps.json                   apps document
//! ```
//!
//! Edits are staged in memory; `commit_edit` writes the staged tracks back to
//! `tracks.json`, so a promotion run against fixtures is visible to the next
//! listing.

use super::apple::{
  AppStoreConnectApi, AppStoreVersionsDocument, AppsDocument, BuildQuery, BuildsDocument, CustomerReviewsDocument,
  VersionQuery,
};
use super::google::{GooglePlayApi, GoogleReview, ReviewsListResponse, Track, TracksListResponse};
use crate::core::error::{DeckError, DeckResult};
use crate::release::model::Store;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug)]
struct StagedEdit {
  package_name: String,
  tracks: Vec<Track>,
}

#[derive(Debug, Default)]
struct EditBook {
  next_id: u64,
  edits: HashMap<String, StagedEdit>,
}

/// File-backed implementation of both store APIs
pub struct FixtureStore {
  root: PathBuf,
  edits: Mutex<EditBook>,
}

impl FixtureStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      edits: Mutex::new(EditBook::default()),
    }
  }

  fn google_file(&self, package_name: &str, file: &str) -> PathBuf {
    self.root.join("google").join(package_name).join(file)
  }

  fn apple_file(&self, app_id: &str, file: &str) -> PathBuf {
    self.root.join("apple").join(app_id).join(file)
  }

  fn book(&self, store: Store) -> DeckResult<std::sync::MutexGuard<'_, EditBook>> {
    self
      .edits
      .lock()
      .map_err(|_| DeckError::upstream(store, None, "fixture edit state poisoned"))
  }

  fn unknown_edit(edit_id: &str) -> DeckError {
    DeckError::upstream(Store::Google, Some(404), format!("edit '{}' does not exist", edit_id))
  }
}

fn read_required<T: DeserializeOwned>(store: Store, path: &Path) -> DeckResult<T> {
  if !path.exists() {
    return Err(DeckError::upstream(
      store,
      Some(404),
      format!("fixture not found: {}", path.display()),
    ));
  }
  let raw = fs::read_to_string(path)?;
  serde_json::from_str(&raw)
    .map_err(|e| DeckError::upstream(store, None, format!("malformed JSON in {}: {}", path.display(), e)))
}

fn read_optional<T: DeserializeOwned + Default>(store: Store, path: &Path) -> DeckResult<T> {
  if path.exists() {
    read_required(store, path)
  } else {
    Ok(T::default())
  }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> DeckResult<()> {
  let content = serde_json::to_string_pretty(value)?;
  fs::write(path, content + "\n")?;
  Ok(())
}

impl GooglePlayApi for FixtureStore {
  fn insert_edit(&self, package_name: &str) -> DeckResult<String> {
    let listing: TracksListResponse = read_required(Store::Google, &self.google_file(package_name, "tracks.json"))?;
    let mut book = self.book(Store::Google)?;
    book.next_id += 1;
    let edit_id = format!("fixture-edit-{}", book.next_id);
    book.edits.insert(
      edit_id.clone(),
      StagedEdit {
        package_name: package_name.to_string(),
        tracks: listing.tracks,
      },
    );
    Ok(edit_id)
  }

  fn list_tracks(&self, package_name: &str, edit_id: &str) -> DeckResult<Vec<Track>> {
    let book = self.book(Store::Google)?;
    book
      .edits
      .get(edit_id)
      .filter(|e| e.package_name == package_name)
      .map(|e| e.tracks.clone())
      .ok_or_else(|| Self::unknown_edit(edit_id))
  }

  fn get_track(&self, package_name: &str, edit_id: &str, track: &str) -> DeckResult<Track> {
    let tracks = self.list_tracks(package_name, edit_id)?;
    Ok(tracks.into_iter().find(|t| t.track == track).unwrap_or_else(|| Track {
      track: track.to_string(),
      releases: Vec::new(),
    }))
  }

  fn update_track(&self, package_name: &str, edit_id: &str, track: &Track) -> DeckResult<()> {
    let mut book = self.book(Store::Google)?;
    let edit = book
      .edits
      .get_mut(edit_id)
      .filter(|e| e.package_name == package_name)
      .ok_or_else(|| Self::unknown_edit(edit_id))?;
    match edit.tracks.iter_mut().find(|t| t.track == track.track) {
      Some(existing) => existing.releases = track.releases.clone(),
      None => edit.tracks.push(track.clone()),
    }
    Ok(())
  }

  fn commit_edit(&self, package_name: &str, edit_id: &str) -> DeckResult<()> {
    let staged = {
      let mut book = self.book(Store::Google)?;
      match book.edits.get(edit_id) {
        Some(e) if e.package_name == package_name => book.edits.remove(edit_id),
        _ => None,
      }
    }
    .ok_or_else(|| Self::unknown_edit(edit_id))?;

    write_json(
      &self.google_file(package_name, "tracks.json"),
      &TracksListResponse { tracks: staged.tracks },
    )
  }

  fn delete_edit(&self, package_name: &str, edit_id: &str) -> DeckResult<()> {
    let mut book = self.book(Store::Google)?;
    match book.edits.get(edit_id) {
      Some(e) if e.package_name == package_name => {
        book.edits.remove(edit_id);
        Ok(())
      }
      _ => Err(Self::unknown_edit(edit_id)),
    }
  }

  fn list_reviews(&self, package_name: &str, limit: usize) -> DeckResult<Vec<GoogleReview>> {
    let response: ReviewsListResponse = read_optional(Store::Google, &self.google_file(package_name, "reviews.json"))?;
    Ok(response.reviews.into_iter().take(limit).collect())
  }
}

impl AppStoreConnectApi for FixtureStore {
  fn app_store_versions(&self, query: &VersionQuery<'_>) -> DeckResult<AppStoreVersionsDocument> {
    let mut doc: AppStoreVersionsDocument = read_required(Store::Apple, &self.apple_file(query.app_id, "versions.json"))?;
    if !query.platforms.is_empty() {
      doc.data.retain(|v| {
        v.attributes
          .platform
          .as_ref()
          .is_some_and(|p| query.platforms.iter().any(|wanted| wanted == p))
      });
    }
    doc.data.truncate(query.limit);
    Ok(doc)
  }

  fn builds(&self, query: &BuildQuery<'_>) -> DeckResult<BuildsDocument> {
    let file = if query.beta_review_state.is_some() {
      "approved_build.json"
    } else {
      "latest_build.json"
    };
    let mut doc: BuildsDocument = read_optional(Store::Apple, &self.apple_file(query.app_id, file))?;

    if let Some(state) = query.beta_review_state {
      let keep: Vec<String> = doc
        .data
        .iter()
        .filter(|b| doc.snapshot(b).beta_review_state.as_deref() == Some(state))
        .map(|b| b.id.clone())
        .collect();
      doc.data.retain(|b| keep.contains(&b.id));
    }
    doc.data.truncate(query.limit);
    Ok(doc)
  }

  fn customer_reviews(&self, app_id: &str, limit: usize) -> DeckResult<CustomerReviewsDocument> {
    let mut doc: CustomerReviewsDocument = read_optional(Store::Apple, &self.apple_file(app_id, "reviews.json"))?;
    doc.data.truncate(limit);
    Ok(doc)
  }

  fn apps(&self, limit: usize) -> DeckResult<AppsDocument> {
    let mut doc: AppsDocument = read_optional(Store::Apple, &self.root.join("apple").join("apps.json"))?;
    doc.data.truncate(limit);
    Ok(doc)
  }
}
