//! Companion chat session domain module.
//!
//! This module contains the chat session models and the repository interface
//! used by the companion chat.
//!
//! # Module Structure
//!
//! - `model`: Core chat session model (`ChatSession`)
//! - `message`: Conversation message types (`MessageRole`, `ChatMessage`)
//! - `repository`: Repository trait for whole-collection session persistence
//!
//! # Usage
//!
//! ```ignore
//! use daysync_core::session::{ChatSession, ChatSessionRepository};
//! use daysync_core::session::{ChatMessage, MessageRole};
//! ```

mod message;
mod model;
mod repository;

// Re-export public API
pub use message::{ChatMessage, MessageRole, now_millis};
pub use model::ChatSession;
pub use repository::ChatSessionRepository;
