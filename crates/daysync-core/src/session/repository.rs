//! Chat session repository trait.
//!
//! Defines the interface for chat session persistence operations.

use super::model::ChatSession;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the durable list of companion chat sessions.
///
/// This trait decouples the companion controller from the storage mechanism
/// (TOML file, in-memory, remote API). Writes replace the whole collection;
/// the stored order is the display order (newest first).
#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    /// Loads every stored session, in stored order.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ChatSession>)`: All stored sessions (possibly empty)
    /// - `Err(_)`: Storage could not be read or decoded
    async fn load_sessions(&self) -> Result<Vec<ChatSession>>;

    /// Replaces the stored collection with `sessions`.
    async fn save_sessions(&self, sessions: &[ChatSession]) -> Result<()>;

    /// Removes every stored session (bulk wipe).
    async fn clear(&self) -> Result<()> {
        self.save_sessions(&[]).await
    }
}
