//! Raw store payloads → normalized `Release` lists
//!
//! Both normalizers are pure: the same payload always yields the same list,
//! in payload order, with full history preserved. Filtering happens later.

use super::model::{Release, StatusCategory, StatusLabel, Store};
use super::status::map_status;
use crate::stores::apple::{AppStoreVersionsDocument, BETA_APPROVED, BuildSnapshot, BuildsDocument};
use crate::stores::google::Track;

/// Apple platform code → display label
const PLATFORM_LABELS: &[(&str, &str)] = &[
  ("IOS", "iOS"),
  ("MAC_OS", "macOS"),
  ("TV_OS", "tvOS"),
  ("VISION_OS", "visionOS"),
];

/// Label for a version whose payload carries no platform
const NO_PLATFORM_LABEL: &str = "App Store";

pub const TESTFLIGHT_TRACK: &str = "TestFlight";
pub const TESTFLIGHT_EXTERNAL_TRACK: &str = "TestFlight (External)";

/// Display label for an Apple platform code; unknown codes pass through
pub fn platform_label(code: &str) -> &str {
  PLATFORM_LABELS
    .iter()
    .find(|(raw, _)| *raw == code)
    .map(|(_, label)| *label)
    .unwrap_or(code)
}

/// One Release per (track, release) pair, in payload order
pub fn normalize_google_releases(tracks: &[Track]) -> Vec<Release> {
  let mut releases = Vec::new();

  for track in tracks {
    for raw in &track.releases {
      let status = map_status(Store::Google, raw.status.as_deref());
      let name = raw.name.as_deref().filter(|n| !n.trim().is_empty());
      let first_code = raw.version_codes.first();

      let release = match (name, first_code) {
        (Some(name), _) => Release::new(Store::Google, name, &track.track, status),
        (None, Some(code)) => Release::new(Store::Google, code.as_str(), &track.track, status).with_version_code(code),
        (None, None) => Release::new(Store::Google, "", &track.track, status),
      };
      releases.push(release);
    }
  }

  releases
}

/// Merge store versions, the latest build and the latest approved build
///
/// `platforms`, when given and non-empty, restricts store versions to those
/// platform codes. TestFlight entries are never platform-filtered.
pub fn normalize_apple_releases(
  versions: &AppStoreVersionsDocument,
  latest_build: &BuildsDocument,
  approved_build: &BuildsDocument,
  platforms: Option<&[String]>,
) -> Vec<Release> {
  let wanted = platforms.filter(|p| !p.is_empty());
  let mut releases = Vec::new();

  for version in &versions.data {
    let platform = version.attributes.platform.as_deref();
    if let Some(wanted) = wanted
      && !platform.is_some_and(|p| wanted.iter().any(|w| w == p))
    {
      continue;
    }

    let track = platform.map(platform_label).unwrap_or(NO_PLATFORM_LABEL);
    let status = map_status(Store::Apple, version.state());
    let version_string = version.attributes.version_string.as_deref().unwrap_or_default();
    releases.push(Release::new(Store::Apple, version_string, track, status));
  }

  let latest = latest_build.latest();
  if let Some(build) = &latest {
    releases.push(testflight_release(build));
  }

  if let Some(approved) = approved_build.latest() {
    let same_build = latest.as_ref().is_some_and(|l| l.id == approved.id);
    if !same_build {
      let version = approved.marketing_version.as_deref().unwrap_or(&approved.build_number);
      let mut release = Release::new(
        Store::Apple,
        version,
        TESTFLIGHT_EXTERNAL_TRACK,
        StatusLabel::new("External", StatusCategory::Live),
      );
      if !approved.build_number.is_empty() {
        release = release.with_version_code(&approved.build_number);
      }
      releases.push(release);
    }
  }

  releases
}

/// Classify the most recent upload
fn testflight_release(build: &BuildSnapshot) -> Release {
  if build.is_processing() {
    let release = Release::new(
      Store::Apple,
      &build.build_number,
      TESTFLIGHT_TRACK,
      StatusLabel::new("Processing", StatusCategory::Pending),
    );
    return with_build_number(release, build);
  }

  let status = match build.beta_review_state.as_deref() {
    Some(BETA_APPROVED) => StatusLabel::new("External", StatusCategory::Live),
    Some("IN_REVIEW") | Some("WAITING_FOR_REVIEW") => StatusLabel::new("In review", StatusCategory::Review),
    _ => StatusLabel::new("Internal", StatusCategory::Live),
  };
  let version = build.marketing_version.as_deref().unwrap_or(&build.build_number);
  with_build_number(Release::new(Store::Apple, version, TESTFLIGHT_TRACK, status), build)
}

fn with_build_number(release: Release, build: &BuildSnapshot) -> Release {
  if build.build_number.is_empty() {
    release
  } else {
    release.with_version_code(&build.build_number)
  }
}
