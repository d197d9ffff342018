//! Test helpers for integration tests

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const CONFIG: &str = r#"[stores]
timeout_secs = 5
fixtures = "fixtures"

[[groups]]
id = "acme"
name = "Acme"
google = { package_name = "com.acme.app", name = "Acme" }
apple = { app_id = "123", name = "Acme", bundle_id = "com.acme.app" }

[[groups]]
id = "legacy"
name = "Legacy"
google = { package_name = "com.acme.legacy" }

[[groups]]
id = "droid"
name = "Droid"
google = { package_name = "com.acme.droid" }
"#;

pub const ACME_TRACKS: &str = r#"{"tracks": [
  {"track": "internal", "releases": [{"name": "2.1", "versionCodes": ["21"], "status": "completed"}]},
  {"track": "alpha", "releases": []},
  {"track": "beta", "releases": [{"name": "2.0", "versionCodes": ["20"], "status": "completed"}]},
  {"track": "production", "releases": [
    {"name": "1.9", "versionCodes": ["19"], "status": "completed"},
    {"name": "1.8", "versionCodes": ["18"], "status": "completed"}
  ]}
]}"#;

pub const LEGACY_TRACKS: &str = r#"{"tracks": [
  {"track": "beta", "releases": [{"name": "1.0", "versionCodes": ["10"], "status": "completed"}]},
  {"track": "production", "releases": [{"name": "1.5", "versionCodes": ["15"], "status": "completed"}]}
]}"#;

pub const ACME_VERSIONS: &str = r#"{"data": [
  {"type": "appStoreVersions", "id": "v4", "attributes": {"versionString": "3.2", "platform": "IOS", "appStoreState": "PREPARE_FOR_SUBMISSION"}},
  {"type": "appStoreVersions", "id": "v3", "attributes": {"versionString": "1.1", "platform": "MAC_OS", "appStoreState": "WAITING_FOR_REVIEW"}},
  {"type": "appStoreVersions", "id": "v2", "attributes": {"versionString": "3.1", "platform": "IOS", "appStoreState": "READY_FOR_SALE"}},
  {"type": "appStoreVersions", "id": "v1", "attributes": {"versionString": "1.0", "platform": "MAC_OS", "appStoreState": "READY_FOR_SALE"}}
]}"#;

pub const ACME_LATEST_BUILD: &str = r#"{
  "data": [{
    "type": "builds", "id": "b300",
    "attributes": {"version": "300", "processingState": "VALID"},
    "relationships": {"preReleaseVersion": {"data": {"type": "preReleaseVersions", "id": "p32"}}}
  }],
  "included": [{"type": "preReleaseVersions", "id": "p32", "attributes": {"version": "3.2"}}]
}"#;

pub const ACME_APPROVED_BUILD: &str = r#"{
  "data": [{
    "type": "builds", "id": "b290",
    "attributes": {"version": "290", "processingState": "VALID"},
    "relationships": {
      "preReleaseVersion": {"data": {"type": "preReleaseVersions", "id": "p31"}},
      "betaAppReviewSubmission": {"data": {"type": "betaAppReviewSubmissions", "id": "s290"}}
    }
  }],
  "included": [
    {"type": "preReleaseVersions", "id": "p31", "attributes": {"version": "3.1"}},
    {"type": "betaAppReviewSubmissions", "id": "s290", "attributes": {"betaReviewState": "APPROVED"}}
  ]
}"#;

pub const ACME_GOOGLE_REVIEWS: &str = r#"{"reviews": [
  {"reviewId": "g-1", "authorName": "Sam", "comments": [{"userComment": {"text": "Solid", "starRating": 4, "lastModified": {"seconds": "1735689600"}}}]},
  {"reviewId": "g-2", "authorName": "Lee", "comments": [{"userComment": {"text": "Crashes", "starRating": 1, "lastModified": {"seconds": "1704067200"}}}]}
]}"#;

pub const ACME_APPLE_REVIEWS: &str = r#"{"data": [
  {"type": "customerReviews", "id": "a-1", "attributes": {"rating": 5, "title": "Love it", "body": "Great", "reviewerNickname": "kim", "createdDate": "2025-02-01T00:00:00-08:00"}}
]}"#;

/// A temp directory with shipdeck.toml and a populated fixture store
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Workspace with the standard config and fixtures
  pub fn new() -> Result<Self> {
    let workspace = Self::empty()?;
    workspace.write("shipdeck.toml", CONFIG)?;
    workspace.write_fixture("google/com.acme.app/tracks.json", ACME_TRACKS)?;
    workspace.write_fixture("google/com.acme.app/reviews.json", ACME_GOOGLE_REVIEWS)?;
    workspace.write_fixture("google/com.acme.legacy/tracks.json", LEGACY_TRACKS)?;
    workspace.write_fixture("apple/123/versions.json", ACME_VERSIONS)?;
    workspace.write_fixture("apple/123/latest_build.json", ACME_LATEST_BUILD)?;
    workspace.write_fixture("apple/123/approved_build.json", ACME_APPROVED_BUILD)?;
    workspace.write_fixture("apple/123/reviews.json", ACME_APPLE_REVIEWS)?;
    Ok(workspace)
  }

  /// Workspace with nothing in it
  pub fn empty() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Write a file relative to the workspace root
  pub fn write(&self, rel: &str, content: &str) -> Result<()> {
    let path = self.path.join(rel);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
  }

  /// Write a file under the fixture directory
  pub fn write_fixture(&self, rel: &str, content: &str) -> Result<()> {
    self.write(&format!("fixtures/{}", rel), content)
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Parse a fixture file as JSON
  pub fn read_fixture_json(&self, rel: &str) -> Result<Value> {
    let raw = self.read_file(&format!("fixtures/{}", rel))?;
    Ok(serde_json::from_str(&raw)?)
  }
}

/// Run the shipdeck binary, returning its output whatever the exit status
pub fn shipdeck(cwd: &Path, args: &[&str]) -> Result<Output> {
  Command::new(env!("CARGO_BIN_EXE_shipdeck"))
    .current_dir(cwd)
    .args(args)
    .env_remove("SHIPDECK_LOG")
    .env_remove("SHIPDECK_GOOGLE_TOKEN")
    .env_remove("SHIPDECK_APPLE_TOKEN")
    .output()
    .context("Failed to run shipdeck")
}

/// Run shipdeck and fail unless it exits successfully
pub fn run_shipdeck(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = shipdeck(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "shipdeck command failed: shipdeck {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run shipdeck with `--json` and parse stdout
pub fn run_json(cwd: &Path, args: &[&str]) -> Result<Value> {
  let mut full = args.to_vec();
  full.push("--json");
  let output = run_shipdeck(cwd, &full)?;
  serde_json::from_slice(&output.stdout).context("stdout was not JSON")
}

/// Run a command expected to fail; returns (exit code, parsed JSON error body)
pub fn run_failing_json(cwd: &Path, args: &[&str]) -> Result<(i32, Value)> {
  let mut full = args.to_vec();
  full.push("--json");
  let output = shipdeck(cwd, &full)?;
  if output.status.success() {
    anyhow::bail!("shipdeck {} unexpectedly succeeded", args.join(" "));
  }
  let code = output.status.code().unwrap_or(-1);
  let body = serde_json::from_slice(&output.stdout).context("error body was not JSON")?;
  Ok((code, body))
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
