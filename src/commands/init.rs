use crate::core::config::{CONFIG_FILE, DeckConfig};
use crate::core::error::{DeckError, DeckResult, ResultExt};
use std::fs;
use std::path::Path;

const TEMPLATE: &str = r#"# shipdeck configuration

[stores]
# Per-request timeout in seconds (1-60)
timeout_secs = 15
# Environment variables holding bearer tokens for each store
google_token_env = "SHIPDECK_GOOGLE_TOKEN"
apple_token_env = "SHIPDECK_APPLE_TOKEN"
# Serve both stores from JSON files instead of the live APIs
# fixtures = "fixtures"

# One [[groups]] entry per product. Link a Google Play app, an Apple app, or both.
#
# [[groups]]
# id = "acme"
# name = "Acme"
# google = { package_name = "com.acme.app", name = "Acme" }
# apple = { app_id = "1234567890", name = "Acme", bundle_id = "com.acme.app", platforms = ["IOS", "MAC_OS"] }
"#;

/// Write a starter shipdeck.toml into `root`
pub fn run_init(root: &Path, force: bool) -> DeckResult<()> {
  if let Some(existing) = DeckConfig::find_config_path(root)
    && !force
  {
    return Err(DeckError::with_help(
      format!("Configuration already exists at {}", existing.display()),
      "Pass --force to overwrite it.",
    ));
  }

  let path = root.join(CONFIG_FILE);
  fs::write(&path, TEMPLATE).with_context(|| format!("Failed to write {}", path.display()))?;

  println!("✅ Created {}", path.display());
  println!();
  println!("Next steps:");
  println!("  1. Add a [[groups]] entry for each app");
  println!("  2. export SHIPDECK_GOOGLE_TOKEN / SHIPDECK_APPLE_TOKEN");
  println!("  3. shipdeck status");
  Ok(())
}
