//! Scoped Google Play edit transaction
//!
//! An `EditTransaction` owns one open edit. It is settled exactly once:
//! `commit` on success, `discard` for read-only use, or a best-effort delete
//! from `Drop` on every other exit path (early `?`, failed commit, panic).

use crate::core::error::DeckResult;
use crate::stores::google::{GooglePlayApi, Track};

pub struct EditTransaction<'a, C: GooglePlayApi + ?Sized> {
  client: &'a C,
  package_name: &'a str,
  id: String,
  settled: bool,
}

impl<'a, C: GooglePlayApi + ?Sized> EditTransaction<'a, C> {
  /// Open an edit scoped to `package_name`
  pub fn open(client: &'a C, package_name: &'a str) -> DeckResult<Self> {
    let id = client.insert_edit(package_name)?;
    tracing::debug!(package = package_name, edit = %id, "opened edit");
    Ok(Self {
      client,
      package_name,
      id,
      settled: false,
    })
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn list_tracks(&self) -> DeckResult<Vec<Track>> {
    self.client.list_tracks(self.package_name, &self.id)
  }

  pub fn get_track(&self, track: &str) -> DeckResult<Track> {
    self.client.get_track(self.package_name, &self.id, track)
  }

  pub fn update_track(&self, track: &Track) -> DeckResult<()> {
    self.client.update_track(self.package_name, &self.id, track)
  }

  /// Commit staged changes
  ///
  /// A failed commit leaves the edit open; it is deleted once when `self`
  /// drops and the commit error is returned unchanged.
  pub fn commit(mut self) -> DeckResult<()> {
    self.client.commit_edit(self.package_name, &self.id)?;
    self.settled = true;
    tracing::debug!(package = self.package_name, edit = %self.id, "committed edit");
    Ok(())
  }

  /// Delete the edit, surfacing a delete failure
  pub fn discard(mut self) -> DeckResult<()> {
    self.settled = true;
    self.client.delete_edit(self.package_name, &self.id)
  }
}

impl<C: GooglePlayApi + ?Sized> Drop for EditTransaction<'_, C> {
  fn drop(&mut self) {
    if self.settled {
      return;
    }
    tracing::debug!(package = self.package_name, edit = %self.id, "rolling back edit");
    if let Err(e) = self.client.delete_edit(self.package_name, &self.id) {
      tracing::warn!(package = self.package_name, edit = %self.id, error = %e, "failed to delete edit during rollback");
    }
  }
}
