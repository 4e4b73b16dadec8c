//! Chat session DTOs.

use daysync_core::DaySyncError;
use daysync_core::session::{ChatMessage, ChatSession, MessageRole};
use serde::{Deserialize, Serialize};

use super::check_schema_version;

pub const SESSIONS_SCHEMA_VERSION: &str = "1.0.0";

/// Root of `sessions.toml`. Sessions are stored in list order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsDocument {
    pub schema_version: String,
    #[serde(default)]
    pub sessions: Vec<ChatSessionV1_0_0>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRoleV1_0_0 {
    User,
    Assistant,
}

impl From<MessageRole> for MessageRoleV1_0_0 {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => Self::User,
            MessageRole::Assistant => Self::Assistant,
        }
    }
}

impl From<MessageRoleV1_0_0> for MessageRole {
    fn from(role: MessageRoleV1_0_0) -> Self {
        match role {
            MessageRoleV1_0_0::User => Self::User,
            MessageRoleV1_0_0::Assistant => Self::Assistant,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageV1_0_0 {
    pub role: MessageRoleV1_0_0,
    pub content: String,
    pub timestamp: i64,
}

/// V1.0.0: one companion session with its full history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSessionV1_0_0 {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub messages: Vec<ChatMessageV1_0_0>,
}

impl From<&ChatSession> for ChatSessionV1_0_0 {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            updated_at: session.updated_at,
            messages: session
                .messages
                .iter()
                .map(|m| ChatMessageV1_0_0 {
                    role: m.role.into(),
                    content: m.content.clone(),
                    timestamp: m.timestamp,
                })
                .collect(),
        }
    }
}

impl From<ChatSessionV1_0_0> for ChatSession {
    fn from(dto: ChatSessionV1_0_0) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            updated_at: dto.updated_at,
            messages: dto
                .messages
                .into_iter()
                .map(|m| ChatMessage {
                    role: m.role.into(),
                    content: m.content,
                    timestamp: m.timestamp,
                })
                .collect(),
        }
    }
}

impl SessionsDocument {
    pub fn from_domain(sessions: &[ChatSession]) -> Self {
        Self {
            schema_version: SESSIONS_SCHEMA_VERSION.to_string(),
            sessions: sessions.iter().map(ChatSessionV1_0_0::from).collect(),
        }
    }

    pub fn into_domain(self) -> Result<Vec<ChatSession>, DaySyncError> {
        check_schema_version(
            "sessions.toml",
            &self.schema_version,
            SESSIONS_SCHEMA_VERSION,
        )?;
        Ok(self.sessions.into_iter().map(ChatSession::from).collect())
    }
}
