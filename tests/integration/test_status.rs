//! Tests for the `status` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_status_covers_every_group() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let status = run_json(&workspace.path, &["status"])?;
  let groups = status.as_array().unwrap();
  assert_eq!(groups.len(), 3);

  let acme = &groups[0];
  assert_eq!(acme["id"], "acme");
  assert_eq!(acme["google"]["releases"].as_array().unwrap().len(), 3);
  assert_eq!(acme["apple"]["releases"].as_array().unwrap().len(), 5);

  // Google-only group has no apple entry at all
  let legacy = &groups[1];
  assert_eq!(legacy["google"]["releases"][0]["version"], "1.0");
  assert!(legacy.get("apple").is_none());

  Ok(())
}

#[test]
fn test_status_reports_store_failures_inline() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  // droid has no fixture files; the command still succeeds
  let status = run_json(&workspace.path, &["status"])?;
  let droid = &status[2];
  assert_eq!(droid["id"], "droid");
  assert_eq!(droid["google"]["error"]["kind"], "upstream");
  let message = droid["google"]["error"]["message"].as_str().unwrap();
  assert!(message.contains("404"));
  assert!(message.contains("com.acme.droid"));

  let output = run_shipdeck(&workspace.path, &["status"])?;
  let text = stdout(&output);
  assert!(text.contains("Droid (droid)"));
  assert!(text.contains("❌"));
  assert!(text.contains("Acme (acme)"));

  Ok(())
}

#[test]
fn test_status_with_explicit_config_path() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  let elsewhere = TestWorkspace::empty()?;
  let config = workspace.path.join("shipdeck.toml");

  // Fixtures resolve relative to the config file, not the working directory
  let status = run_json(&elsewhere.path, &["status", "--config", config.to_str().unwrap()])?;
  assert_eq!(status.as_array().unwrap().len(), 3);
  assert!(status[0]["google"].get("releases").is_some());

  Ok(())
}
