//! Chat session domain model.
//!
//! This module contains the core ChatSession entity used by the companion
//! chat. Sessions are mutated only by appending messages.

use super::message::{ChatMessage, now_millis};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters kept when a title is derived from a message.
pub const TITLE_SNIPPET_CHARS: usize = 20;

/// Represents one open-ended companion conversation.
///
/// A session contains:
/// - A human-readable title, auto-derived from the first user message
/// - The append-only message history
/// - The time of the last change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// Conversation history, oldest first
    pub messages: Vec<ChatMessage>,
    /// Last update time in milliseconds since the Unix epoch
    pub updated_at: i64,
}

impl ChatSession {
    /// Creates a session that opens with a single assistant message.
    pub fn with_opening(title: impl Into<String>, opening: impl Into<String>) -> Self {
        let opening = ChatMessage::assistant(opening);
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            updated_at: opening.timestamp,
            messages: vec![opening],
        }
    }

    /// Appends a message and refreshes `updated_at`.
    pub fn push(&mut self, message: ChatMessage) {
        self.updated_at = message.timestamp.max(now_millis());
        self.messages.push(message);
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Builds a title from the leading characters of `text`.
    ///
    /// "..." is appended when the text had to be cut.
    pub fn snippet_title(text: &str) -> String {
        let text = text.trim();
        let mut chars = text.chars();
        let head: String = chars.by_ref().take(TITLE_SNIPPET_CHARS).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}
