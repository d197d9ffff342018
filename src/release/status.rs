//! Store status vocabularies mapped onto `{label, category}`
//!
//! Both tables are closed and static. Lookups never fail: Google falls back to
//! Draft, Apple falls back to the raw state string in the pending category.

use super::model::{StatusCategory, StatusLabel, Store};

/// Google Play track release statuses
const GOOGLE_STATUS: &[(&str, &str, StatusCategory)] = &[
  ("completed", "Live", StatusCategory::Live),
  ("inProgress", "Rolling out", StatusCategory::Pending),
  ("halted", "Halted", StatusCategory::Issue),
  ("draft", "Draft", StatusCategory::Draft),
];

/// App Store Connect app store version states
const APPLE_STATUS: &[(&str, &str, StatusCategory)] = &[
  ("READY_FOR_SALE", "Live", StatusCategory::Live),
  ("PREORDER_READY_FOR_SALE", "Pre-order", StatusCategory::Live),
  ("IN_REVIEW", "In review", StatusCategory::Review),
  ("WAITING_FOR_REVIEW", "Waiting for review", StatusCategory::Review),
  ("READY_FOR_REVIEW", "Ready for review", StatusCategory::Review),
  ("PENDING_DEVELOPER_RELEASE", "Pending release", StatusCategory::Pending),
  ("PENDING_APPLE_RELEASE", "Pending Apple release", StatusCategory::Pending),
  ("PROCESSING_FOR_APP_STORE", "Processing", StatusCategory::Pending),
  ("WAITING_FOR_EXPORT_COMPLIANCE", "Export compliance", StatusCategory::Pending),
  ("PENDING_CONTRACT", "Pending contract", StatusCategory::Pending),
  ("REJECTED", "Rejected", StatusCategory::Issue),
  ("METADATA_REJECTED", "Metadata rejected", StatusCategory::Issue),
  ("DEVELOPER_REJECTED", "Developer rejected", StatusCategory::Issue),
  ("INVALID_BINARY", "Invalid binary", StatusCategory::Issue),
  ("REMOVED_FROM_SALE", "Removed from sale", StatusCategory::Issue),
  ("PREPARE_FOR_SUBMISSION", "Prepare for submission", StatusCategory::Draft),
];

/// Map a raw store status to its display label and category
pub fn map_status(store: Store, raw: Option<&str>) -> StatusLabel {
  match store {
    Store::Google => map_google_status(raw),
    Store::Apple => map_apple_status(raw.unwrap_or_default()),
  }
}

/// Google track release status; unknown or absent is Draft
pub fn map_google_status(raw: Option<&str>) -> StatusLabel {
  raw
    .and_then(|status| GOOGLE_STATUS.iter().find(|(key, _, _)| *key == status))
    .map(|(_, label, category)| StatusLabel::new(*label, *category))
    .unwrap_or_else(|| StatusLabel::new("Draft", StatusCategory::Draft))
}

/// Apple app store state; unknown states keep their raw name as pending
pub fn map_apple_status(raw: &str) -> StatusLabel {
  APPLE_STATUS
    .iter()
    .find(|(key, _, _)| *key == raw)
    .map(|(_, label, category)| StatusLabel::new(*label, *category))
    .unwrap_or_else(|| StatusLabel::new(raw, StatusCategory::Pending))
}
