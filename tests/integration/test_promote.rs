//! Tests for the `promote` command

use crate::helpers::*;
use anyhow::Result;

const ACME_TRACKS_FILE: &str = "google/com.acme.app/tracks.json";

fn track_releases(workspace: &TestWorkspace, track: &str) -> Result<serde_json::Value> {
  let doc = workspace.read_fixture_json(ACME_TRACKS_FILE)?;
  let found = doc["tracks"]
    .as_array()
    .unwrap()
    .iter()
    .find(|t| t["track"] == track)
    .map(|t| t["releases"].clone())
    .unwrap_or_default();
  Ok(found)
}

#[test]
fn test_promote_stages_and_commits_partial_rollout() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let result = run_json(
    &workspace.path,
    &["promote", "acme", "--from", "beta", "--to", "production", "--rollout", "50"],
  )?;
  assert_eq!(result["dryRun"], false);
  assert_eq!(result["plan"]["packageName"], "com.acme.app");
  assert_eq!(result["plan"]["source"], "beta");
  assert_eq!(result["plan"]["dest"], "production");
  assert_eq!(result["plan"]["status"], "inProgress");
  assert_eq!(result["plan"]["userFraction"], 0.5);
  assert_eq!(result["outcome"]["versionCodes"], serde_json::json!(["20"]));
  assert_eq!(result["outcome"]["releaseName"], "2.0");
  assert_eq!(result["outcome"]["editId"], "fixture-edit-2");

  // Production now carries the beta release, rolling out to half the users
  let production = track_releases(&workspace, "production")?;
  assert_eq!(
    production,
    serde_json::json!([{
      "name": "2.0",
      "versionCodes": ["20"],
      "status": "inProgress",
      "userFraction": 0.5
    }])
  );
  // Source track is untouched
  assert_eq!(track_releases(&workspace, "beta")?[0]["name"], "2.0");

  // The next listing reflects the promotion
  let releases = run_json(&workspace.path, &["releases", "acme", "--store", "google"])?;
  let production = releases["stores"][0]["releases"]
    .as_array()
    .unwrap()
    .iter()
    .find(|r| r["track"] == "production")
    .cloned()
    .unwrap();
  assert_eq!(production["version"], "2.0");
  assert_eq!(production["status"], "Rolling out");

  Ok(())
}

#[test]
fn test_promote_full_rollout_is_completed() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_shipdeck(&workspace.path, &["promote", "acme", "--from", "internal", "--to", "alpha"])?;
  let text = stdout(&output);
  assert!(text.contains("Promotion Plan"));
  assert!(text.contains("internal → alpha"));
  assert!(text.contains("Promoted version code(s) 21 to alpha"));

  let alpha = track_releases(&workspace, "alpha")?;
  assert_eq!(alpha[0]["status"], "completed");
  assert!(alpha[0].get("userFraction").is_none());

  Ok(())
}

#[test]
fn test_promote_dry_run_changes_nothing() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  let before = workspace.read_file(&format!("fixtures/{}", ACME_TRACKS_FILE))?;

  let result = run_json(
    &workspace.path,
    &["promote", "acme", "--from", "beta", "--to", "production", "--dry-run"],
  )?;
  assert_eq!(result["dryRun"], true);
  assert_eq!(result["plan"]["rollout"], 100);
  assert_eq!(result["plan"]["status"], "completed");
  assert!(result.get("outcome").is_none());

  let after = workspace.read_file(&format!("fixtures/{}", ACME_TRACKS_FILE))?;
  assert_eq!(before, after);

  Ok(())
}

#[test]
fn test_promote_plan_id_is_stable() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  let args = ["promote", "acme", "--from", "beta", "--to", "production", "--dry-run"];

  let first = run_json(&workspace.path, &args)?;
  let second = run_json(&workspace.path, &args)?;
  assert_eq!(first["plan"]["id"], second["plan"]["id"]);
  assert_eq!(first["plan"]["id"].as_str().unwrap().len(), 64);

  Ok(())
}

#[test]
fn test_promote_rejects_bad_requests() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  let before = workspace.read_file(&format!("fixtures/{}", ACME_TRACKS_FILE))?;

  let cases = [
    ("--from beta --to staging", "Invalid track name 'staging'"),
    ("--from production --to beta", "must be higher"),
    ("--from beta --to beta", "must be higher"),
    ("--from beta --to production --rollout 0", "Rollout must be 1-100 (got 0)"),
    ("--from beta --to production --rollout 101", "Rollout must be 1-100 (got 101)"),
  ];

  for (extra, expected) in cases {
    let mut args = vec!["promote", "acme"];
    args.extend(extra.split_whitespace());
    let (code, body) = run_failing_json(&workspace.path, &args)?;
    assert_eq!(code, 3, "args: {:?}", args);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"]["kind"], "validation");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains(expected), "{} does not contain {}", message, expected);
  }

  assert_eq!(before, workspace.read_file(&format!("fixtures/{}", ACME_TRACKS_FILE))?);

  Ok(())
}

#[test]
fn test_promote_blocks_downgrade() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let (code, body) = run_failing_json(
    &workspace.path,
    &["promote", "legacy", "--from", "beta", "--to", "production"],
  )?;
  assert_eq!(code, 3);
  assert_eq!(body["error"]["kind"], "validation");
  assert_eq!(
    body["error"]["message"],
    "Release 1.0 is not newer than 1.5 already on production"
  );

  let doc = workspace.read_fixture_json("google/com.acme.legacy/tracks.json")?;
  assert_eq!(doc["tracks"][1]["releases"][0]["name"], "1.5");

  Ok(())
}

#[test]
fn test_promote_empty_source_track_is_state_error() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  let before = workspace.read_file(&format!("fixtures/{}", ACME_TRACKS_FILE))?;

  let (code, body) = run_failing_json(&workspace.path, &["promote", "acme", "--from", "alpha", "--to", "beta"])?;
  assert_eq!(code, 2);
  assert_eq!(body["error"]["kind"], "state");
  assert_eq!(body["error"]["message"], "No release found on source track 'alpha'");

  // The edit was discarded, so nothing was written
  assert_eq!(before, workspace.read_file(&format!("fixtures/{}", ACME_TRACKS_FILE))?);

  Ok(())
}

#[test]
fn test_promote_requires_google_link() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write(
    "shipdeck.toml",
    &format!(
      "{}\n[[groups]]\nid = \"ios-only\"\nname = \"iOS only\"\napple = {{ app_id = \"999\" }}\n",
      CONFIG
    ),
  )?;

  let (code, body) = run_failing_json(
    &workspace.path,
    &["promote", "ios-only", "--from", "beta", "--to", "production"],
  )?;
  assert_eq!(code, 1);
  assert_eq!(body["error"]["kind"], "config");

  Ok(())
}

#[test]
fn test_promote_skips_draft_at_head_of_source() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_fixture(
    "google/com.acme.legacy/tracks.json",
    r#"{"tracks": [
  {"track": "beta", "releases": [
    {"name": "1.0", "versionCodes": ["10"], "status": "draft"},
    {"name": "3.0", "versionCodes": ["30"], "status": "completed"}
  ]},
  {"track": "production", "releases": [{"name": "2.0", "versionCodes": ["20"], "status": "completed"}]}
]}"#,
  )?;

  let result = run_json(
    &workspace.path,
    &["promote", "legacy", "--from", "beta", "--to", "production"],
  )?;
  assert_eq!(result["outcome"]["versionCodes"], serde_json::json!(["30"]));

  let doc = workspace.read_fixture_json("google/com.acme.legacy/tracks.json")?;
  assert_eq!(doc["tracks"][1]["releases"][0]["name"], "3.0");
  assert_eq!(doc["tracks"][1]["releases"][0]["versionCodes"], serde_json::json!(["30"]));

  Ok(())
}
