//! Entry repository trait.
//!
//! Defines the interface for day entry persistence operations.

use super::model::DayEntry;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the durable list of completed day entries.
///
/// Persistence is whole-collection: the caller loads every entry, edits the
/// list in memory and writes the whole list back (last writer wins). The
/// stored order is the display order, newest first.
///
/// # Implementation Notes
///
/// Implementations must:
/// - Return an empty list when nothing has been stored yet
/// - Preserve the order of the saved slice exactly
/// - Never drop records silently when stored data cannot be read
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Loads every stored entry, in stored order.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<DayEntry>)`: All stored entries (possibly empty)
    /// - `Err(_)`: Storage could not be read or decoded
    async fn load_entries(&self) -> Result<Vec<DayEntry>>;

    /// Replaces the stored collection with `entries`.
    ///
    /// # Arguments
    ///
    /// * `entries` - The complete collection to store
    async fn save_entries(&self, entries: &[DayEntry]) -> Result<()>;

    /// Removes every stored entry.
    async fn clear(&self) -> Result<()> {
        self.save_entries(&[]).await
    }
}
