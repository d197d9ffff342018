//! CLI commands for shipdeck
//!
//! ## Setup & Inspection
//! - **init**: Write a starter shipdeck.toml
//! - **groups**: List configured app groups
//! - **apps**: Apps visible to the store credentials
//! - **status**: Latest releases of every group, both stores, fetched in parallel
//!
//! ## Releases
//! - **releases**: Normalized (and filtered) releases of one group
//! - **targets**: Eligible promotion targets per Google Play release
//! - **promote**: Move a Google Play release to a higher track
//! - **compare**: Version comparator
//!
//! ## Reviews
//! - **reviews**: Newest reviews across both stores
//!
//! Commands that talk to a store accept `&DeckContext` so config and clients
//! are built once.

pub mod apps;
pub mod compare;
pub mod groups;
pub mod init;
pub mod promote;
pub mod releases;
pub mod reviews;
pub mod status;

pub use apps::run_apps;
pub use compare::run_compare;
pub use groups::run_groups;
pub use init::run_init;
pub use promote::run_promote;
pub use releases::{run_releases, run_targets};
pub use reviews::run_reviews;
pub use status::run_status;
