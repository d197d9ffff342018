//! Progress indicators for long-running fetches
//!
//! Uses `linya` for allocation-free, concurrency-friendly progress bars.
//! Bars are only drawn when stderr is a terminal.

use linya::{Bar, Progress};
use std::io::IsTerminal;
use std::sync::Mutex;

/// Thread-safe progress bar for parallel per-group fetches
pub struct FetchProgress {
  inner: Option<(Mutex<Progress>, Bar)>,
}

impl FetchProgress {
  /// Create a bar with `total` steps; hidden when stderr is not a terminal
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    if total == 0 || !std::io::stderr().is_terminal() {
      return Self::hidden();
    }
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self {
      inner: Some((Mutex::new(progress), bar)),
    }
  }

  /// A bar that never draws
  pub fn hidden() -> Self {
    Self { inner: None }
  }

  /// Increment by 1 (thread-safe)
  pub fn inc(&self) {
    if let Some((progress, bar)) = &self.inner
      && let Ok(mut progress) = progress.lock()
    {
      progress.inc_and_draw(bar, 1);
    }
  }
}
