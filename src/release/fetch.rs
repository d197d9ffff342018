//! Fetch raw store payloads and normalize them
//!
//! Apple releases come from three independent requests issued concurrently
//! and joined before normalization. If any of them fails, the whole fetch
//! fails; no partial list is ever produced.

use super::edit::EditTransaction;
use super::model::Release;
use super::normalize::{normalize_apple_releases, normalize_google_releases};
use crate::core::error::{DeckResult, ResultExt};
use crate::stores::apple::{AppStoreConnectApi, BETA_APPROVED, BuildQuery, VersionQuery};
use crate::stores::google::{GooglePlayApi, Track};

/// Most recent app store versions considered per app
pub const APPLE_VERSION_LIMIT: usize = 10;

/// List every track through a throwaway edit
pub fn fetch_google_tracks<C: GooglePlayApi + ?Sized>(client: &C, package_name: &str) -> DeckResult<Vec<Track>> {
  let edit = EditTransaction::open(client, package_name)?;
  let tracks = edit.list_tracks()?;
  edit.discard()?;
  Ok(tracks)
}

/// Full normalized Google release history for a package
pub fn fetch_google_releases<C: GooglePlayApi + ?Sized>(client: &C, package_name: &str) -> DeckResult<Vec<Release>> {
  let tracks = fetch_google_tracks(client, package_name)
    .with_context(|| format!("Failed to load Google Play tracks for {}", package_name))?;
  Ok(normalize_google_releases(&tracks))
}

/// Normalized Apple releases from versions, latest build and latest approved build
pub fn fetch_apple_releases<C: AppStoreConnectApi + ?Sized>(
  client: &C,
  app_id: &str,
  platforms: &[String],
) -> DeckResult<Vec<Release>> {
  let versions_query = VersionQuery {
    app_id,
    platforms,
    limit: APPLE_VERSION_LIMIT,
  };
  let latest_query = BuildQuery {
    app_id,
    beta_review_state: None,
    limit: 1,
  };
  let approved_query = BuildQuery {
    app_id,
    beta_review_state: Some(BETA_APPROVED),
    limit: 1,
  };

  let (versions, (latest, approved)) = rayon::join(
    || client.app_store_versions(&versions_query),
    || {
      rayon::join(
        || client.builds(&latest_query),
        || client.builds(&approved_query),
      )
    },
  );

  let context = || format!("Failed to load App Store Connect releases for app {}", app_id);
  let versions = versions.with_context(context)?;
  let latest = latest.with_context(context)?;
  let approved = approved.with_context(context)?;

  Ok(normalize_apple_releases(&versions, &latest, &approved, Some(platforms)))
}
