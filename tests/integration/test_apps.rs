//! Tests for the `apps` command

use crate::helpers::*;
use anyhow::Result;

const APPS: &str = r#"{"data": [
  {"type": "apps", "id": "123", "attributes": {"name": "Acme", "bundleId": "com.acme.app"}},
  {"type": "apps", "id": "456", "attributes": {"name": "Acme Studio", "bundleId": "com.acme.studio"}}
]}"#;

#[test]
fn test_apps_lists_apple_apps_with_linked_group() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_fixture("apple/apps.json", APPS)?;

  let apps = run_json(&workspace.path, &["apps", "--store", "apple"])?;
  let apps = apps.as_array().unwrap();
  assert_eq!(apps.len(), 2);
  assert_eq!(apps[0]["appId"], "123");
  assert_eq!(apps[0]["bundleId"], "com.acme.app");
  assert_eq!(apps[0]["group"], "acme");
  assert_eq!(apps[1]["name"], "Acme Studio");
  assert!(apps[1].get("group").is_none());

  let output = run_shipdeck(&workspace.path, &["apps", "--store", "apple"])?;
  let text = stdout(&output);
  assert!(text.contains("com.acme.studio"));
  assert!(text.contains("[acme]"));

  Ok(())
}

#[test]
fn test_apps_checks_configured_packages_inline() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  let before = workspace.read_file("fixtures/google/com.acme.app/tracks.json")?;

  let checks = run_json(&workspace.path, &["apps", "--store", "google"])?;
  let checks = checks.as_array().unwrap();
  assert_eq!(checks.len(), 3);
  assert_eq!(checks[0]["packageName"], "com.acme.app");
  assert_eq!(checks[0]["name"], "Acme");
  assert_eq!(checks[0]["accessible"], true);
  assert_eq!(checks[1]["name"], "Legacy");
  assert_eq!(checks[2]["packageName"], "com.acme.droid");
  assert_eq!(checks[2]["accessible"], false);
  assert!(checks[2]["error"].as_str().unwrap().contains("404"));

  // The throwaway edit is never committed
  assert_eq!(workspace.read_file("fixtures/google/com.acme.app/tracks.json")?, before);

  Ok(())
}

#[test]
fn test_apps_explicit_package_must_be_reachable() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let checks = run_json(&workspace.path, &["apps", "--store", "google", "--package", "com.acme.legacy"])?;
  assert_eq!(checks[0]["accessible"], true);

  let (code, body) = run_failing_json(
    &workspace.path,
    &["apps", "--store", "google", "--package", "com.acme.unknown"],
  )?;
  assert_eq!(code, 2);
  assert_eq!(body["error"]["kind"], "upstream");
  assert!(body["error"]["message"].as_str().unwrap().contains("com.acme.unknown"));

  Ok(())
}
