//! Google Play track promotion
//!
//! Tracks form a fixed ladder `internal < alpha < beta < production`. A
//! release may move up the ladder, never sideways or down, and never onto a
//! track whose current release is the same version or newer.
//!
//! The workflow runs inside one edit transaction:
//!
//! ```text
//! validate → open edit → read source track → stage dest track → commit
//!                  └──────────── any failure: delete edit ────────────┘
//! ```

use super::edit::EditTransaction;
use super::model::{Release, StatusCategory, Store};
use super::status::map_google_status;
use super::version::compare_releases;
use crate::core::error::{DeckResult, StateError, ValidationError};
use crate::core::plan::PlanId;
use crate::stores::google::{GooglePlayApi, Track, TrackRelease};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

pub const DEFAULT_ROLLOUT: u32 = 100;

/// The standard Play tracks, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayTrack {
  Internal,
  Alpha,
  Beta,
  Production,
}

impl PlayTrack {
  pub const ORDER: [PlayTrack; 4] = [
    PlayTrack::Internal,
    PlayTrack::Alpha,
    PlayTrack::Beta,
    PlayTrack::Production,
  ];

  /// Parse a standard track name; custom tracks yield `None`
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ORDER.into_iter().find(|t| t.as_str() == name)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      PlayTrack::Internal => "internal",
      PlayTrack::Alpha => "alpha",
      PlayTrack::Beta => "beta",
      PlayTrack::Production => "production",
    }
  }

  /// Tracks strictly above this one, lowest first
  pub fn higher(self) -> impl Iterator<Item = PlayTrack> {
    Self::ORDER.into_iter().filter(move |t| *t > self)
  }
}

impl fmt::Display for PlayTrack {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The release a track currently shows: its first non-draft entry
pub fn current_release<'a>(releases: &'a [Release], track: &str) -> Option<&'a Release> {
  releases.iter().find(|r| r.track() == track && !r.is_draft())
}

/// The raw release a promotion moves: the track's first non-draft entry
///
/// Same choice as `current_release`, so the downgrade check and the staged
/// release always agree.
fn source_release(track: &Track) -> Option<&TrackRelease> {
  track
    .releases
    .iter()
    .find(|r| map_google_status(r.status.as_deref()).category != StatusCategory::Draft)
}

/// Whether `release` may be promoted onto `dest`
///
/// `releases` is the package's normalized Google release list; it supplies
/// the destination's current release.
pub fn is_promotable(release: &Release, dest: PlayTrack, releases: &[Release]) -> bool {
  let Some(source) = PlayTrack::from_name(release.track()) else {
    return false;
  };
  if release.store() != Store::Google || dest <= source {
    return false;
  }

  match current_release(releases, dest.as_str()) {
    None => true,
    Some(existing) => compare_releases(release, existing) == Ordering::Greater,
  }
}

/// Every track `release` can be promoted to, lowest first
pub fn promotion_targets(release: &Release, releases: &[Release]) -> Vec<PlayTrack> {
  match PlayTrack::from_name(release.track()) {
    Some(source) if release.store() == Store::Google => source
      .higher()
      .filter(|dest| is_promotable(release, *dest, releases))
      .collect(),
    _ => Vec::new(),
  }
}

/// Unvalidated promotion input as received from a caller
#[derive(Debug, Clone, Default)]
pub struct PromotionRequest {
  pub package_name: String,
  pub source_track: String,
  pub dest_track: String,
  /// Percentage of users, `1..=100`; `None` means 100
  pub rollout: Option<u32>,
}

impl PromotionRequest {
  /// Check every input before any remote call
  pub fn validate(&self) -> DeckResult<PromotionPlan> {
    if self.package_name.trim().is_empty() {
      return Err(ValidationError::MissingField { field: "packageName" }.into());
    }
    if self.source_track.trim().is_empty() {
      return Err(ValidationError::MissingField { field: "sourceTrack" }.into());
    }
    if self.dest_track.trim().is_empty() {
      return Err(ValidationError::MissingField { field: "destTrack" }.into());
    }

    let source = parse_track(&self.source_track)?;
    let dest = parse_track(&self.dest_track)?;
    if dest <= source {
      return Err(
        ValidationError::NotAnUpgrade {
          source: source.to_string(),
          dest: dest.to_string(),
        }
        .into(),
      );
    }

    let rollout = self.rollout.unwrap_or(DEFAULT_ROLLOUT);
    if !(1..=100).contains(&rollout) {
      return Err(ValidationError::RolloutOutOfRange { rollout }.into());
    }

    PromotionPlan::new(self.package_name.trim(), source, dest, rollout)
  }
}

fn parse_track(name: &str) -> DeckResult<PlayTrack> {
  PlayTrack::from_name(name).ok_or_else(|| ValidationError::InvalidTrack { name: name.to_string() }.into())
}

/// A validated promotion, ready to run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionPlan {
  pub id: PlanId,
  pub package_name: String,
  pub source: PlayTrack,
  pub dest: PlayTrack,
  pub rollout: u32,
  /// Release status written to the destination
  pub status: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_fraction: Option<f64>,
}

impl PromotionPlan {
  fn new(package_name: &str, source: PlayTrack, dest: PlayTrack, rollout: u32) -> DeckResult<Self> {
    let (status, user_fraction) = if rollout == 100 {
      ("completed", None)
    } else {
      ("inProgress", Some(f64::from(rollout) / 100.0))
    };
    let id = PlanId::of(&serde_json::json!({
      "packageName": package_name,
      "source": source,
      "dest": dest,
      "rollout": rollout,
    }))?;

    Ok(Self {
      id,
      package_name: package_name.to_string(),
      source,
      dest,
      rollout,
      status,
      user_fraction,
    })
  }

  /// Destination track body carrying the source release's version codes
  fn staged_track(&self, source: &TrackRelease) -> Track {
    Track {
      track: self.dest.to_string(),
      releases: vec![TrackRelease {
        name: source.name.clone(),
        version_codes: source.version_codes.clone(),
        status: Some(self.status.to_string()),
        user_fraction: self.user_fraction,
      }],
    }
  }

  /// Refuse a plan that would not move a newer release onto `dest`
  ///
  /// `releases` is the package's normalized Google list. A source track with
  /// nothing on it is left for the workflow to report as a state error.
  pub fn ensure_upgrade(&self, releases: &[Release]) -> DeckResult<()> {
    let Some(candidate) = current_release(releases, self.source.as_str()) else {
      return Ok(());
    };
    if is_promotable(candidate, self.dest, releases) {
      return Ok(());
    }

    let dest_version = current_release(releases, self.dest.as_str())
      .map(|r| r.version().to_string())
      .unwrap_or_default();
    Err(
      ValidationError::WouldDowngrade {
        version: candidate.version().to_string(),
        dest: self.dest.to_string(),
        dest_version,
      }
      .into(),
    )
  }
}

/// What a committed promotion changed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionOutcome {
  pub plan: PromotionPlan,
  pub edit_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub release_name: Option<String>,
  pub version_codes: Vec<String>,
}

/// Validate and run a promotion
pub fn promote<C: GooglePlayApi + ?Sized>(client: &C, request: &PromotionRequest) -> DeckResult<PromotionOutcome> {
  let plan = request.validate()?;
  execute_plan(client, &plan)
}

/// Run a validated plan inside one edit transaction
///
/// Any failure after the edit opens deletes the edit once and returns the
/// original error; a failed delete is only logged.
pub fn execute_plan<C: GooglePlayApi + ?Sized>(client: &C, plan: &PromotionPlan) -> DeckResult<PromotionOutcome> {
  tracing::info!(
    package = %plan.package_name,
    source = %plan.source,
    dest = %plan.dest,
    rollout = plan.rollout,
    "promoting release"
  );

  let edit = EditTransaction::open(client, &plan.package_name)?;

  let source_track = edit.get_track(plan.source.as_str())?;
  let source = source_release(&source_track)
    .filter(|r| !r.version_codes.is_empty())
    .ok_or_else(|| StateError::NoSourceRelease {
      track: plan.source.to_string(),
    })?;

  edit.update_track(&plan.staged_track(source))?;

  let edit_id = edit.id().to_string();
  edit.commit()?;

  tracing::info!(package = %plan.package_name, edit = %edit_id, "promotion committed");
  Ok(PromotionOutcome {
    plan: plan.clone(),
    edit_id,
    release_name: source.name.clone(),
    version_codes: source.version_codes.clone(),
  })
}
