use crate::core::context::DeckContext;
use crate::core::error::DeckResult;
use crate::release::fetch_google_releases;
use crate::release::promote::{PromotionOutcome, PromotionPlan, PromotionRequest, promote};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromoteOutput<'a> {
  dry_run: bool,
  plan: &'a PromotionPlan,
  #[serde(skip_serializing_if = "Option::is_none")]
  outcome: Option<&'a PromotionOutcome>,
}

/// Promote a group's Google Play release from one track to a higher one
pub fn run_promote(
  ctx: &DeckContext,
  group_id: &str,
  from: &str,
  to: &str,
  rollout: Option<u32>,
  dry_run: bool,
  json: bool,
) -> DeckResult<()> {
  let group = ctx.config.group(group_id)?;
  let app = group.google_app()?;

  let request = PromotionRequest {
    package_name: app.package_name.clone(),
    source_track: from.to_string(),
    dest_track: to.to_string(),
    rollout,
  };
  let plan = request.validate()?;

  let client = ctx.google()?;
  let releases = fetch_google_releases(client, &plan.package_name)?;
  plan.ensure_upgrade(&releases)?;

  if !json {
    print_plan(&plan);
    if ctx.uses_fixtures() {
      println!("🧪 Using fixture store");
    }
  }

  if dry_run {
    if json {
      let output = PromoteOutput {
        dry_run,
        plan: &plan,
        outcome: None,
      };
      println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
      println!("🔍 Dry-run mode (no changes applied)");
    }
    return Ok(());
  }

  let outcome = promote(client, &request)?;

  if json {
    let output = PromoteOutput {
      dry_run,
      plan: &plan,
      outcome: Some(&outcome),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
  } else {
    println!("✅ Promoted version code(s) {} to {}", outcome.version_codes.join(", "), plan.dest);
    println!("   Edit:     {}", outcome.edit_id);
  }
  Ok(())
}

fn print_plan(plan: &PromotionPlan) {
  println!("📋 Promotion Plan {}", plan.id);
  println!();
  println!("  Package:  {}", plan.package_name);
  println!("  Tracks:   {} → {}", plan.source, plan.dest);
  match plan.user_fraction {
    Some(fraction) => println!("  Rollout:  {}% ({}, userFraction {})", plan.rollout, plan.status, fraction),
    None => println!("  Rollout:  {}% ({})", plan.rollout, plan.status),
  }
  println!();
}
