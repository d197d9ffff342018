use crate::core::config::AppGroup;
use crate::core::context::DeckContext;
use crate::core::error::{ConfigError, DeckError, DeckResult};
use crate::release::model::{Release, StatusCategory, Store};
use crate::release::promote::{PlayTrack, promotion_targets};
use crate::release::{fetch_apple_releases, fetch_google_releases, filter_latest};
use serde::Serialize;

/// Full normalized history of one store for a group
pub(crate) fn load_releases(ctx: &DeckContext, group: &AppGroup, store: Store) -> DeckResult<Vec<Release>> {
  match store {
    Store::Google => fetch_google_releases(ctx.google()?, &group.google_app()?.package_name),
    Store::Apple => {
      let app = group.apple_app()?;
      fetch_apple_releases(ctx.apple()?, &app.app_id, &app.platforms)
    }
  }
}

/// Stores to show: the requested one (which must be linked) or every linked one
pub(crate) fn selected_stores(group: &AppGroup, store: Option<Store>) -> DeckResult<Vec<Store>> {
  match store {
    Some(store) if group.links(store) => Ok(vec![store]),
    Some(store) => Err(DeckError::Config(ConfigError::StoreNotLinked {
      group: group.id.clone(),
      store,
    })),
    None => Ok(
      [Store::Google, Store::Apple]
        .into_iter()
        .filter(|s| group.links(*s))
        .collect(),
    ),
  }
}

pub(crate) fn status_icon(category: StatusCategory) -> &'static str {
  match category {
    StatusCategory::Live => "🟢",
    StatusCategory::Review => "🟡",
    StatusCategory::Pending => "🔵",
    StatusCategory::Issue => "🔴",
    StatusCategory::Draft => "⚪",
  }
}

pub(crate) fn print_release(release: &Release) {
  let code = release
    .version_code()
    .filter(|c| *c != release.version())
    .map(|c| format!(" ({})", c))
    .unwrap_or_default();
  println!(
    "   {} {:<22} {}{}  {}",
    status_icon(release.status_category()),
    release.track(),
    release.version(),
    code,
    release.status()
  );
}

fn store_title(store: Store) -> &'static str {
  match store {
    Store::Google => "Google Play",
    Store::Apple => "App Store",
  }
}

#[derive(Serialize)]
struct StoreReleases {
  store: Store,
  releases: Vec<Release>,
}

#[derive(Serialize)]
struct GroupReleases<'a> {
  group: &'a str,
  stores: Vec<StoreReleases>,
}

/// Show a group's releases, filtered to the latest unless `all`
pub fn run_releases(ctx: &DeckContext, group_id: &str, store: Option<Store>, all: bool, json: bool) -> DeckResult<()> {
  let group = ctx.config.group(group_id)?;

  let mut stores = Vec::new();
  let mut targets = Vec::new();
  for store in selected_stores(group, store)? {
    let history = load_releases(ctx, group, store)?;
    let shown = if all { history.clone() } else { filter_latest(&history) };
    if store == Store::Google {
      targets = shown.iter().map(|r| promotion_targets(r, &history)).collect();
    }
    stores.push(StoreReleases { store, releases: shown });
  }

  if json {
    let output = GroupReleases { group: &group.id, stores };
    println!("{}", serde_json::to_string_pretty(&output)?);
    return Ok(());
  }

  println!("📱 {} ({})", group.name, group.id);
  for entry in &stores {
    println!();
    println!("{}", store_title(entry.store));
    if entry.releases.is_empty() {
      println!("   No releases");
      continue;
    }
    for (i, release) in entry.releases.iter().enumerate() {
      print_release(release);
      let promotable: &[PlayTrack] = match entry.store {
        Store::Google => targets.get(i).map(Vec::as_slice).unwrap_or_default(),
        Store::Apple => &[],
      };
      if !promotable.is_empty() {
        let names: Vec<&str> = promotable.iter().map(PlayTrack::as_str).collect();
        println!("      ↳ can promote to: {}", names.join(", "));
      }
    }
  }
  Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TargetEntry {
  track: String,
  version: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  version_code: Option<String>,
  targets: Vec<PlayTrack>,
}

/// Eligible promotion targets for each displayed Google release
pub fn run_targets(ctx: &DeckContext, group_id: &str, track: Option<&str>, json: bool) -> DeckResult<()> {
  let group = ctx.config.group(group_id)?;
  let history = load_releases(ctx, group, Store::Google)?;

  let entries: Vec<TargetEntry> = filter_latest(&history)
    .iter()
    .filter(|r| track.is_none_or(|t| r.track() == t))
    .map(|r| TargetEntry {
      track: r.track().to_string(),
      version: r.version().to_string(),
      version_code: r.version_code().map(str::to_string),
      targets: promotion_targets(r, &history),
    })
    .collect();

  if json {
    println!("{}", serde_json::to_string_pretty(&entries)?);
    return Ok(());
  }

  println!("🚀 Promotion targets for {} ({})", group.name, group.id);
  println!();
  if entries.is_empty() {
    println!("   No releases");
    return Ok(());
  }
  for entry in &entries {
    let targets = if entry.targets.is_empty() {
      "none".to_string()
    } else {
      entry.targets.iter().map(PlayTrack::as_str).collect::<Vec<_>>().join(", ")
    };
    println!("   {:<12} {:<10} → {}", entry.track, entry.version, targets);
  }
  Ok(())
}
