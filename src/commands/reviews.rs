use super::releases::selected_stores;
use crate::core::context::DeckContext;
use crate::core::error::DeckResult;
use crate::release::model::Store;
use crate::reviews::{Review, fetch_apple_reviews, fetch_google_reviews, newest_first};

/// Show a group's most recent reviews across its stores
pub fn run_reviews(ctx: &DeckContext, group_id: &str, store: Option<Store>, limit: usize, json: bool) -> DeckResult<()> {
  let group = ctx.config.group(group_id)?;

  let mut reviews: Vec<Review> = Vec::new();
  for store in selected_stores(group, store)? {
    let batch = match store {
      Store::Google => fetch_google_reviews(ctx.google()?, &group.google_app()?.package_name, limit)?,
      Store::Apple => fetch_apple_reviews(ctx.apple()?, &group.apple_app()?.app_id, limit)?,
    };
    reviews.extend(batch);
  }
  let reviews = newest_first(reviews, limit);

  if json {
    println!("{}", serde_json::to_string_pretty(&reviews)?);
    return Ok(());
  }

  println!("💬 Reviews for {} ({})", group.name, group.id);
  println!();
  if reviews.is_empty() {
    println!("   No reviews");
    return Ok(());
  }
  for review in &reviews {
    let stars = format!("{}{}", "★".repeat(review.rating as usize), "☆".repeat(5 - review.rating as usize));
    println!("{} {}  {} · {}", stars, review.store, review.author, review.date);
    if let Some(title) = &review.title {
      println!("   {}", title);
    }
    if !review.body.is_empty() {
      println!("   {}", review.body);
    }
    println!();
  }
  Ok(())
}
