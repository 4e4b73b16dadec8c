//! Analysis service trait.

use super::error::AnalysisError;
use crate::entry::{DayAnalysis, DayEntry};
use crate::session::ChatMessage;
use async_trait::async_trait;

/// The external natural-language service used by check-ins and the companion.
///
/// Calls are asynchronous request/response. The core enforces no timeout of
/// its own and never retries; implementations should resolve or fail in
/// bounded time.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Asks for one follow-up question about what the user just said.
    ///
    /// # Arguments
    ///
    /// * `last_user_message` - The message the question should respond to
    /// * `conversation_history` - Contents of every message so far, oldest first
    async fn request_follow_up(
        &self,
        last_user_message: &str,
        conversation_history: &[String],
    ) -> Result<String, AnalysisError>;

    /// Analyses a finished check-in.
    ///
    /// The result must satisfy the `DayAnalysis` shape; anything else is
    /// reported as [`AnalysisError::Malformed`].
    ///
    /// # Arguments
    ///
    /// * `primary_entry` - The first thing the user said
    /// * `follow_up_responses` - The user's later answers, in order
    /// * `past_entries` - Previously stored entries, newest first
    async fn request_day_analysis(
        &self,
        primary_entry: &str,
        follow_up_responses: &[String],
        past_entries: &[DayEntry],
    ) -> Result<DayAnalysis, AnalysisError>;

    /// Produces a free-form companion reply.
    ///
    /// # Arguments
    ///
    /// * `message` - The new user message
    /// * `session_history` - The session's messages before `message`
    async fn request_companion_reply(
        &self,
        message: &str,
        session_history: &[ChatMessage],
    ) -> Result<String, AnalysisError>;
}
