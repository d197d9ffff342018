//! Reduce a release history to what is worth showing
//!
//! Google: the newest non-draft release per track, tracks in first-seen order.
//! Apple: per platform at most one in-flight and one live release, platforms
//! in a fixed priority order, in-flight listed above live.

use super::model::{Release, Store};

/// Display order of Apple platforms; anything else sorts after these
const PLATFORM_ORDER: &[&str] = &["iOS", "macOS", "tvOS", "visionOS"];

fn platform_rank(track: &str) -> usize {
  PLATFORM_ORDER
    .iter()
    .position(|p| *p == track)
    .unwrap_or(PLATFORM_ORDER.len())
}

/// Keep the latest relevant releases of a single-store list
///
/// The list is assumed newest-first. Drafts are always dropped.
pub fn filter_latest(releases: &[Release]) -> Vec<Release> {
  match releases.first().map(Release::store) {
    Some(Store::Google) => latest_per_track(releases),
    Some(Store::Apple) => latest_per_platform(releases),
    None => Vec::new(),
  }
}

fn latest_per_track(releases: &[Release]) -> Vec<Release> {
  let mut kept: Vec<Release> = Vec::new();
  for release in releases.iter().filter(|r| !r.is_draft()) {
    if !kept.iter().any(|k| k.track() == release.track()) {
      kept.push(release.clone());
    }
  }
  kept
}

#[derive(Default)]
struct PlatformSlot<'a> {
  live: Option<&'a Release>,
  upcoming: Option<&'a Release>,
}

fn latest_per_platform(releases: &[Release]) -> Vec<Release> {
  let mut groups: Vec<(&str, PlatformSlot<'_>)> = Vec::new();

  for release in releases.iter().filter(|r| !r.is_draft()) {
    let index = match groups.iter().position(|(track, _)| *track == release.track()) {
      Some(i) => i,
      None => {
        groups.push((release.track(), PlatformSlot::default()));
        groups.len() - 1
      }
    };
    let slot = &mut groups[index].1;
    if release.is_live() {
      slot.live.get_or_insert(release);
    } else {
      slot.upcoming.get_or_insert(release);
    }
  }

  // Stable: unlisted platforms keep their first-seen order
  groups.sort_by_key(|(track, _)| platform_rank(track));

  groups
    .into_iter()
    .flat_map(|(_, slot)| slot.upcoming.into_iter().chain(slot.live))
    .cloned()
    .collect()
}
