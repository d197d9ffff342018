//! Release normalization and promotion engine
//!
//! # Data flow
//!
//! ```text
//! raw store payloads ──► status + normalize ──► Vec<Release>
//!                                                  │
//!                                            filter_latest ──► displayed subset
//!                                                  │
//!                                     promotion_targets / promote ──► edit transaction
//! ```
//!
//! # Invariants
//!
//! 1. **`statusCategory` is the only status logic branches on**
//!    - Labels are for display; filters and eligibility read the category
//!
//! 2. **Releases are immutable**
//!    - Every fetch builds a fresh list; nothing edits a `Release` in place
//!
//! 3. **Edits are always settled**
//!    - An opened Google Play edit is committed or deleted on every exit path
//!
//! 4. **No partial Apple results**
//!    - The three Apple sources are fetched together; one failure fails all

pub mod edit;
pub mod fetch;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod promote;
pub mod status;
pub mod version;

pub use fetch::{fetch_apple_releases, fetch_google_releases};
pub use filter::filter_latest;
