use crate::core::context::DeckContext;
use crate::core::error::DeckResult;

/// List configured app groups
pub fn run_groups(ctx: &DeckContext, json: bool) -> DeckResult<()> {
  let groups = &ctx.config.groups;

  if json {
    println!("{}", serde_json::to_string_pretty(groups)?);
    return Ok(());
  }

  if groups.is_empty() {
    println!("⚠️  No app groups configured");
    println!();
    println!("Add a group to shipdeck.toml:");
    println!("  [[groups]]");
    println!("  id = \"my-app\"");
    println!("  name = \"My App\"");
    println!("  google = {{ package_name = \"com.example.app\" }}");
    return Ok(());
  }

  println!("📦 App groups");
  println!();
  for group in groups {
    println!("{} ({})", group.name, group.id);
    if let Some(google) = &group.google {
      println!("   Google Play:  {}", google.package_name);
    }
    if let Some(apple) = &group.apple {
      let platforms = if apple.platforms.is_empty() {
        "all platforms".to_string()
      } else {
        apple.platforms.join(", ")
      };
      println!("   App Store:    {} ({})", apple.app_id, platforms);
    }
    println!();
  }
  Ok(())
}
