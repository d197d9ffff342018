//! Tests for the `init` and `groups` commands

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let workspace = TestWorkspace::empty()?;

  run_shipdeck(&workspace.path, &["init"])?;

  assert!(workspace.file_exists("shipdeck.toml"));
  let config = workspace.read_file("shipdeck.toml")?;
  assert!(config.contains("[stores]"));
  assert!(config.contains("timeout_secs = 15"));

  // The starter config loads and has no groups yet
  let groups = run_json(&workspace.path, &["groups"])?;
  assert_eq!(groups, serde_json::json!([]));

  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite_without_force() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let (code, body) = run_failing_json(&workspace.path, &["init"])?;
  assert_eq!(code, 1);
  assert_eq!(body["ok"], false);
  assert!(
    body["error"]["message"]
      .as_str()
      .unwrap()
      .contains("Configuration already exists")
  );

  // The existing config is untouched
  assert_eq!(workspace.read_file("shipdeck.toml")?, CONFIG);

  run_shipdeck(&workspace.path, &["init", "--force"])?;
  assert_ne!(workspace.read_file("shipdeck.toml")?, CONFIG);

  Ok(())
}

#[test]
fn test_missing_config_points_at_init() -> Result<()> {
  let workspace = TestWorkspace::empty()?;

  let output = shipdeck(&workspace.path, &["status"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("shipdeck init"));

  Ok(())
}

#[test]
fn test_groups_lists_configured_apps() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let groups = run_json(&workspace.path, &["groups"])?;
  let ids: Vec<&str> = groups
    .as_array()
    .unwrap()
    .iter()
    .map(|g| g["id"].as_str().unwrap())
    .collect();
  assert_eq!(ids, vec!["acme", "legacy", "droid"]);
  assert_eq!(groups[0]["google"]["package_name"], "com.acme.app");
  assert_eq!(groups[0]["apple"]["app_id"], "123");

  let output = run_shipdeck(&workspace.path, &["groups"])?;
  assert!(stdout(&output).contains("Acme (acme)"));

  Ok(())
}
