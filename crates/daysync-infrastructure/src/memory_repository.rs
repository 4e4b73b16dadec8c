//! In-memory repositories.
//!
//! Used by tests and by the CLI's `--ephemeral` mode. Both hold the whole
//! collection behind a tokio `RwLock`.

use async_trait::async_trait;
use daysync_core::Result;
use daysync_core::entry::{DayEntry, EntryRepository};
use daysync_core::session::{ChatSession, ChatSessionRepository};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryEntryRepository {
    entries: RwLock<Vec<DayEntry>>,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<DayEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn load_entries(&self) -> Result<Vec<DayEntry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn save_entries(&self, entries: &[DayEntry]) -> Result<()> {
        *self.entries.write().await = entries.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryChatSessionRepository {
    sessions: RwLock<Vec<ChatSession>>,
}

impl InMemoryChatSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<ChatSession>) -> Self {
        Self {
            sessions: RwLock::new(sessions),
        }
    }
}

#[async_trait]
impl ChatSessionRepository for InMemoryChatSessionRepository {
    async fn load_sessions(&self) -> Result<Vec<ChatSession>> {
        Ok(self.sessions.read().await.clone())
    }

    async fn save_sessions(&self, sessions: &[ChatSession]) -> Result<()> {
        *self.sessions.write().await = sessions.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_store_replaces_whole_collection() {
        let repo = InMemoryChatSessionRepository::with_sessions(vec![
            ChatSession::with_opening("a", "hello"),
            ChatSession::with_opening("b", "hello"),
        ]);
        let only = ChatSession::with_opening("c", "hello");

        repo.save_sessions(std::slice::from_ref(&only)).await.unwrap();
        assert_eq!(repo.load_sessions().await.unwrap(), vec![only]);

        repo.clear().await.unwrap();
        assert!(repo.load_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_entry_store_starts_empty() {
        let repo = InMemoryEntryRepository::new();
        assert!(repo.load_entries().await.unwrap().is_empty());
    }
}
