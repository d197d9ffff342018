use crate::core::config::DeckConfig;
use crate::core::context::DeckContext;
use crate::core::error::{DeckResult, ResultExt};
use crate::release::model::Store;
use crate::stores::GooglePlayApi;
use crate::stores::apple::MAX_PAGE;
use serde::Serialize;

/// An App Store Connect app visible to the API key
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleListing {
  pub app_id: String,
  pub name: String,
  pub bundle_id: String,
  /// Group whose config already links this app
  #[serde(skip_serializing_if = "Option::is_none")]
  pub group: Option<String>,
}

/// Whether a Google Play package can be edited with the current credentials
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCheck {
  pub package_name: String,
  pub name: String,
  pub accessible: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

/// List Apple apps, or check Google Play packages
///
/// Google Play has no listing endpoint, so a package is checked by opening an
/// edit and discarding it. An explicit `--package` that fails is an error;
/// configured packages are reported inline.
pub fn run_apps(ctx: &DeckContext, store: Store, package: Option<&str>, json: bool) -> DeckResult<()> {
  match store {
    Store::Apple => {
      let listings = apple_listings(ctx)?;
      if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
      } else {
        print_apple(&listings);
      }
    }
    Store::Google => {
      let google = ctx.google()?;
      let checks = match package {
        Some(package) => {
          check_package(google, package).with_context(|| format!("Package '{}' is not accessible", package))?;
          vec![PackageCheck {
            package_name: package.to_string(),
            name: configured_name(&ctx.config, package),
            accessible: true,
            error: None,
          }]
        }
        None => configured_packages(&ctx.config)
          .into_iter()
          .map(|package| {
            let result = check_package(google, &package);
            PackageCheck {
              name: configured_name(&ctx.config, &package),
              accessible: result.is_ok(),
              error: result.err().map(|e| e.to_string()),
              package_name: package,
            }
          })
          .collect(),
      };
      if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
      } else {
        print_google(&checks);
      }
    }
  }
  Ok(())
}

fn apple_listings(ctx: &DeckContext) -> DeckResult<Vec<AppleListing>> {
  let doc = ctx.apple()?.apps(MAX_PAGE)?;
  Ok(
    doc
      .data
      .into_iter()
      .map(|app| {
        let group = ctx
          .config
          .groups
          .iter()
          .find(|g| g.apple.as_ref().is_some_and(|a| a.app_id == app.id))
          .map(|g| g.id.clone());
        AppleListing {
          name: app.attributes.name.unwrap_or_default(),
          bundle_id: app.attributes.bundle_id.unwrap_or_default(),
          app_id: app.id,
          group,
        }
      })
      .collect(),
  )
}

/// Open an edit and throw it away
fn check_package(google: &dyn GooglePlayApi, package: &str) -> DeckResult<()> {
  let edit_id = google.insert_edit(package)?;
  google.delete_edit(package, &edit_id)
}

/// Configured packages in group order, without repeats
fn configured_packages(config: &DeckConfig) -> Vec<String> {
  let mut packages: Vec<String> = Vec::new();
  for google in config.groups.iter().filter_map(|g| g.google.as_ref()) {
    if !packages.contains(&google.package_name) {
      packages.push(google.package_name.clone());
    }
  }
  packages
}

fn configured_name(config: &DeckConfig, package: &str) -> String {
  config
    .groups
    .iter()
    .filter_map(|g| g.google.as_ref().map(|google| (g, google)))
    .find(|(_, google)| google.package_name == package)
    .map(|(g, google)| if google.name.is_empty() { g.name.clone() } else { google.name.clone() })
    .unwrap_or_else(|| package.to_string())
}

fn print_apple(listings: &[AppleListing]) {
  println!("🍎 App Store Connect apps");
  println!();
  if listings.is_empty() {
    println!("   No apps visible to this key");
    return;
  }
  for app in listings {
    let linked = app.group.as_deref().map(|g| format!("  [{}]", g)).unwrap_or_default();
    println!("   {:<12} {}  {}{}", app.app_id, app.name, app.bundle_id, linked);
  }
}

fn print_google(checks: &[PackageCheck]) {
  println!("🤖 Google Play packages");
  println!();
  if checks.is_empty() {
    println!("   No packages configured (pass --package to check one)");
    return;
  }
  for check in checks {
    match &check.error {
      None => println!("   ✅ {}  {}", check.package_name, check.name),
      Some(error) => println!("   ❌ {}  {}", check.package_name, error),
    }
  }
}
