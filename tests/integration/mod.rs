//! Integration tests for the shipdeck CLI, run against fixture stores

mod helpers;
mod test_apps;
mod test_compare;
mod test_init;
mod test_promote;
mod test_reviews;
mod test_status;
