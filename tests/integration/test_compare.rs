//! Tests for the `compare` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_compare_is_numeric_per_segment() -> Result<()> {
  let workspace = TestWorkspace::empty()?;

  let output = run_shipdeck(&workspace.path, &["compare", "1.10.0", "1.9.9"])?;
  assert_eq!(stdout(&output).trim(), "1.10.0 > 1.9.9 (1)");

  Ok(())
}

#[test]
fn test_compare_json_breaks_ties_on_build_number() -> Result<()> {
  let workspace = TestWorkspace::empty()?;

  let result = run_json(
    &workspace.path,
    &["compare", "2.0", "2.0.0", "--code-a", "41", "--code-b", "42"],
  )?;
  assert_eq!(result["a"], "2.0");
  assert_eq!(result["codeB"], "42");
  assert_eq!(result["ordering"], "<");
  assert!(result["result"].as_i64().unwrap() < 0);

  Ok(())
}

#[test]
fn test_compare_equal_without_codes() -> Result<()> {
  let workspace = TestWorkspace::empty()?;

  let result = run_json(&workspace.path, &["compare", "3.1", "3.1.0"])?;
  assert_eq!(result["result"], 0);
  assert_eq!(result["ordering"], "=");
  assert!(result.get("codeA").is_none());

  Ok(())
}
