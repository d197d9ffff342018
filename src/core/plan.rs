//! Content-addressed plan identifiers
//!
//! Mutating operations describe themselves as a serializable plan before
//! running. The plan id is the SHA-256 of the plan's canonical JSON, so the
//! same request always prints the same id in dry-run and real runs.

use crate::core::error::DeckResult;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Plan identifier (SHA-256 hash of plan contents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanId(String);

impl PlanId {
  /// Create a plan ID from plan contents
  pub fn from_contents(contents: &[u8]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    Self(format!("{:x}", hasher.finalize()))
  }

  /// Hash the JSON form of a value
  pub fn of<T: Serialize>(value: &T) -> DeckResult<Self> {
    let bytes = serde_json::to_vec(value)?;
    Ok(Self::from_contents(&bytes))
  }

  /// Get the short ID (first 12 characters)
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

impl fmt::Display for PlanId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.short())
  }
}
