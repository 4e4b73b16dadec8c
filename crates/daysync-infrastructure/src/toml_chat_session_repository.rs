//! TOML-based ChatSessionRepository implementation

use crate::dto::SessionsDocument;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use daysync_core::session::{ChatSession, ChatSessionRepository};
use daysync_core::{DaySyncError, Result};
use std::path::{Path, PathBuf};

/// Stores every companion session, with full history, in one TOML document.
#[derive(Clone)]
pub struct TomlChatSessionRepository {
    file: AtomicTomlFile<SessionsDocument>,
}

impl TomlChatSessionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicTomlFile::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl ChatSessionRepository for TomlChatSessionRepository {
    async fn load_sessions(&self) -> Result<Vec<ChatSession>> {
        let file = self.file.clone();
        let document = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| DaySyncError::internal(format!("Failed to join task: {}", e)))??;

        let sessions = match document {
            Some(document) => document.into_domain()?,
            None => Vec::new(),
        };
        tracing::debug!(
            "[TomlChatSessionRepository] Loaded {} sessions from {:?}",
            sessions.len(),
            self.file.path()
        );
        Ok(sessions)
    }

    async fn save_sessions(&self, sessions: &[ChatSession]) -> Result<()> {
        let document = SessionsDocument::from_domain(sessions);
        let file = self.file.clone();

        tokio::task::spawn_blocking(move || file.save(&document))
            .await
            .map_err(|e| DaySyncError::internal(format!("Failed to join task: {}", e)))??;

        tracing::debug!(
            "[TomlChatSessionRepository] Saved {} sessions to {:?}",
            sessions.len(),
            self.file.path()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daysync_core::session::ChatMessage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_load_sessions() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlChatSessionRepository::new(temp_dir.path().join("sessions.toml"));

        let mut first = ChatSession::with_opening("First Conversation", "I am here to listen.");
        first.push(ChatMessage::user("Long week at work"));
        first.push(ChatMessage::assistant("That sounds draining."));
        let second = ChatSession::with_opening("New Session", "What's on your mind?");

        repo.save_sessions(&[second.clone(), first.clone()])
            .await
            .unwrap();

        let loaded = repo.load_sessions().await.unwrap();
        assert_eq!(loaded, vec![second, first]);
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlChatSessionRepository::new(temp_dir.path().join("nope.toml"));
        assert!(repo.load_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_content_with_quotes_and_newlines_survives() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlChatSessionRepository::new(temp_dir.path().join("sessions.toml"));

        let mut session = ChatSession::with_opening("t", "o");
        session.push(ChatMessage::user("line one\n\"quoted\" line two = [x]"));
        repo.save_sessions(std::slice::from_ref(&session))
            .await
            .unwrap();

        let loaded = repo.load_sessions().await.unwrap();
        assert_eq!(loaded[0].messages[1].content, "line one\n\"quoted\" line two = [x]");
    }
}
