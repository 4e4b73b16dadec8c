use daysync_core::analysis::AnalysisError;
use daysync_core::session::ChatMessage;

/// Why a companion message was not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanionRejection {
    EmptyInput,
    /// The archive view is showing; there is no session to send to.
    NoActiveSession,
    UnknownSession(String),
    /// This session is still waiting for its previous reply.
    Busy,
}

/// Result of one companion message turn.
#[derive(Debug, Clone, PartialEq)]
pub enum CompanionOutcome {
    Replied {
        session_id: String,
        reply: ChatMessage,
        /// The new title, when this turn named the session.
        retitled: Option<String>,
        store_warning: Option<String>,
    },
    /// The reply request failed. The user's message stays in the session.
    Failed {
        session_id: String,
        error: AnalysisError,
        store_warning: Option<String>,
    },
    Rejected(CompanionRejection),
}
