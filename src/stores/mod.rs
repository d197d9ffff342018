//! Store API collaborators
//!
//! Each store is reached through a narrow trait (`GooglePlayApi`,
//! `AppStoreConnectApi`). Live clients speak HTTP through a shared transport;
//! `FixtureStore` answers both traits from JSON files for offline use.

pub mod apple;
pub mod fixture;
pub mod google;
mod http;

pub use apple::{AppStoreConnectApi, AppStoreConnectClient};
pub use fixture::FixtureStore;
pub use google::{GooglePlayApi, GooglePlayClient};
