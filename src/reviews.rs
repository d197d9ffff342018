//! Normalized customer reviews from both stores

use crate::core::error::{DeckResult, ResultExt};
use crate::release::model::Store;
use crate::stores::apple::{AppStoreConnectApi, CustomerReviewsDocument};
use crate::stores::google::{GooglePlayApi, GoogleReview};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub const DEFAULT_REVIEW_LIMIT: usize = 50;

const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
  pub id: String,
  pub store: Store,
  /// 1-5 stars
  pub rating: u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  pub body: String,
  pub author: String,
  /// RFC 3339, UTC when the store's value could be parsed
  pub date: String,
}

impl Review {
  fn timestamp(&self) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&self.date)
      .ok()
      .map(|d| d.with_timezone(&Utc))
  }
}

fn clamp_rating(raw: Option<i64>) -> u8 {
  raw.unwrap_or(1).clamp(1, 5) as u8
}

fn rfc3339(date: DateTime<Utc>) -> String {
  date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// One review per Play review that carries a user comment
pub fn normalize_google_reviews(raw: &[GoogleReview]) -> Vec<Review> {
  raw
    .iter()
    .filter_map(|review| {
      let comment = review.comments.iter().find_map(|c| c.user_comment.as_ref())?;

      let date = comment
        .last_modified
        .as_ref()
        .and_then(|ts| {
          let seconds = ts.seconds.as_ref()?.value()?;
          DateTime::from_timestamp(seconds, ts.nanos.unwrap_or(0))
        })
        .unwrap_or(DateTime::UNIX_EPOCH);

      Some(Review {
        id: review.review_id.clone(),
        store: Store::Google,
        rating: clamp_rating(comment.star_rating),
        title: None,
        body: comment.text.as_deref().unwrap_or_default().trim().to_string(),
        author: review
          .author_name
          .as_deref()
          .map(str::trim)
          .filter(|a| !a.is_empty())
          .unwrap_or(ANONYMOUS)
          .to_string(),
        date: rfc3339(date),
      })
    })
    .collect()
}

/// One review per `customerReviews` resource
pub fn normalize_apple_reviews(doc: &CustomerReviewsDocument) -> Vec<Review> {
  doc
    .data
    .iter()
    .map(|review| {
      let attrs = &review.attributes;
      let date = attrs.created_date.as_deref().unwrap_or_default();
      let date = DateTime::parse_from_rfc3339(date)
        .map(|d| rfc3339(d.with_timezone(&Utc)))
        .unwrap_or_else(|_| date.to_string());

      Review {
        id: review.id.clone(),
        store: Store::Apple,
        rating: clamp_rating(attrs.rating),
        title: attrs.title.clone().filter(|t| !t.trim().is_empty()),
        body: attrs.body.as_deref().unwrap_or_default().trim().to_string(),
        author: attrs
          .reviewer_nickname
          .clone()
          .filter(|a| !a.trim().is_empty())
          .unwrap_or_else(|| ANONYMOUS.to_string()),
        date,
      }
    })
    .collect()
}

/// Sort newest first (unparseable dates last) and keep `limit` reviews
pub fn newest_first(mut reviews: Vec<Review>, limit: usize) -> Vec<Review> {
  reviews.sort_by_key(|r| std::cmp::Reverse(r.timestamp()));
  reviews.truncate(limit);
  reviews
}

pub fn fetch_google_reviews<C: GooglePlayApi + ?Sized>(
  client: &C,
  package_name: &str,
  limit: usize,
) -> DeckResult<Vec<Review>> {
  let raw = client
    .list_reviews(package_name, limit)
    .with_context(|| format!("Failed to load Google Play reviews for {}", package_name))?;
  Ok(normalize_google_reviews(&raw))
}

pub fn fetch_apple_reviews<C: AppStoreConnectApi + ?Sized>(
  client: &C,
  app_id: &str,
  limit: usize,
) -> DeckResult<Vec<Review>> {
  let doc = client
    .customer_reviews(app_id, limit)
    .with_context(|| format!("Failed to load App Store reviews for app {}", app_id))?;
  Ok(normalize_apple_reviews(&doc))
}
