//! Dotted version comparison with a numeric build-number tie-break

use super::model::Release;
use std::cmp::Ordering;

/// Parse a single segment; anything non-numeric counts as 0
fn segment(part: Option<&str>) -> i64 {
  part.and_then(|p| p.trim().parse::<i64>().ok()).unwrap_or(0)
}

/// Parse a build number; missing or garbage counts as 0
fn build_number(code: Option<&str>) -> i64 {
  segment(code)
}

/// Compare two dotted version strings segment by segment
///
/// Returns negative, zero or positive. Missing segments are 0, so
/// `"1.2"` and `"1.2.0"` are equal.
pub fn compare_versions(a: &str, b: &str) -> i64 {
  compare_versions_with_codes(a, None, b, None)
}

/// Compare versions, falling back to build numbers when all segments match
pub fn compare_versions_with_codes(a: &str, code_a: Option<&str>, b: &str, code_b: Option<&str>) -> i64 {
  let pa: Vec<&str> = a.split('.').collect();
  let pb: Vec<&str> = b.split('.').collect();

  for i in 0..pa.len().max(pb.len()) {
    let diff = segment(pa.get(i).copied()).saturating_sub(segment(pb.get(i).copied()));
    if diff != 0 {
      return diff;
    }
  }

  build_number(code_a).saturating_sub(build_number(code_b))
}

/// Compare two normalized releases (version, then version code)
pub fn compare_releases(a: &Release, b: &Release) -> Ordering {
  compare_versions_with_codes(a.version(), a.version_code(), b.version(), b.version_code()).cmp(&0)
}
