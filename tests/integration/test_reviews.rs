//! Tests for the `reviews` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_reviews_merge_stores_newest_first() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let reviews = run_json(&workspace.path, &["reviews", "acme"])?;
  let ids: Vec<&str> = reviews
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["id"].as_str().unwrap())
    .collect();
  assert_eq!(ids, vec!["a-1", "g-1", "g-2"]);

  // Apple dates are normalized to UTC
  assert_eq!(reviews[0]["store"], "apple");
  assert_eq!(reviews[0]["date"], "2025-02-01T08:00:00Z");
  assert_eq!(reviews[0]["title"], "Love it");
  assert_eq!(reviews[0]["rating"], 5);

  // Google timestamps are epoch seconds
  assert_eq!(reviews[1]["date"], "2025-01-01T00:00:00Z");
  assert_eq!(reviews[1]["author"], "Sam");
  assert!(reviews[1].get("title").is_none());

  Ok(())
}

#[test]
fn test_reviews_limit_and_store_filter() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let limited = run_json(&workspace.path, &["reviews", "acme", "--limit", "2"])?;
  assert_eq!(limited.as_array().unwrap().len(), 2);
  assert_eq!(limited[1]["id"], "g-1");

  let google = run_json(&workspace.path, &["reviews", "acme", "--store", "google"])?;
  let stores: Vec<&str> = google
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["store"].as_str().unwrap())
    .collect();
  assert_eq!(stores, vec!["google", "google"]);

  Ok(())
}

#[test]
fn test_reviews_without_fixture_file_is_empty() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let reviews = run_json(&workspace.path, &["reviews", "legacy"])?;
  assert_eq!(reviews, serde_json::json!([]));

  let output = run_shipdeck(&workspace.path, &["reviews", "legacy"])?;
  assert!(stdout(&output).contains("No reviews"));

  Ok(())
}
