use super::releases::{load_releases, print_release};
use crate::core::config::AppGroup;
use crate::core::context::DeckContext;
use crate::core::error::DeckResult;
use crate::release::filter_latest;
use crate::release::model::{Release, Store};
use crate::ui::progress::FetchProgress;
use rayon::prelude::*;
use serde::Serialize;

/// Latest releases of one store, or why they could not be loaded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
  Releases(Vec<Release>),
  Error { kind: String, message: String },
}

/// Dashboard row for one app group
#[derive(Debug, Clone, Serialize)]
pub struct GroupStatus {
  pub id: String,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub google: Option<StoreStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub apple: Option<StoreStatus>,
}

fn store_status(ctx: &DeckContext, group: &AppGroup, store: Store) -> Option<StoreStatus> {
  if !group.links(store) {
    return None;
  }
  let status = match load_releases(ctx, group, store) {
    Ok(history) => StoreStatus::Releases(filter_latest(&history)),
    Err(e) => {
      tracing::warn!(group = %group.id, %store, error = %e, "store fetch failed");
      StoreStatus::Error {
        kind: e.kind().to_string(),
        message: e.to_string(),
      }
    }
  };
  Some(status)
}

/// Collect the dashboard for every group in parallel
pub fn collect_status(ctx: &DeckContext, progress: &FetchProgress) -> Vec<GroupStatus> {
  ctx
    .config
    .groups
    .par_iter()
    .map(|group| {
      let (google, apple) = rayon::join(
        || store_status(ctx, group, Store::Google),
        || store_status(ctx, group, Store::Apple),
      );
      progress.inc();
      GroupStatus {
        id: group.id.clone(),
        name: group.name.clone(),
        google,
        apple,
      }
    })
    .collect()
}

/// Run the status command
pub fn run_status(ctx: &DeckContext, json: bool) -> DeckResult<()> {
  let progress = if json {
    FetchProgress::hidden()
  } else {
    FetchProgress::new(ctx.config.groups.len(), "Fetching stores")
  };
  let statuses = collect_status(ctx, &progress);

  if json {
    println!("{}", serde_json::to_string_pretty(&statuses)?);
    return Ok(());
  }

  if statuses.is_empty() {
    println!("⚠️  No app groups configured");
    return Ok(());
  }

  println!();
  for status in &statuses {
    println!("📱 {} ({})", status.name, status.id);
    print_store("Google Play", status.google.as_ref());
    print_store("App Store", status.apple.as_ref());
    println!();
  }
  Ok(())
}

fn print_store(title: &str, status: Option<&StoreStatus>) {
  match status {
    None => {}
    Some(StoreStatus::Releases(releases)) => {
      println!("  {}", title);
      if releases.is_empty() {
        println!("   No releases");
      }
      for release in releases {
        print_release(release);
      }
    }
    Some(StoreStatus::Error { message, .. }) => {
      println!("  {}", title);
      println!("   ❌ {}", message);
    }
  }
}
