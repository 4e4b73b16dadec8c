//! Check-in conversation state.

use daysync_core::entry::DayEntry;
use daysync_core::session::ChatMessage;

/// Assistant message every check-in starts with.
pub const OPENING_MESSAGE: &str = "I'm listening. How was your day?";

/// Appended when a follow-up request fails.
pub const APOLOGY_MESSAGE: &str = "There was a small error, but I am still here. Shall we finish?";

/// Machine-generated questions asked before the conversation finalizes itself.
pub const MAX_FOLLOW_UPS: u8 = 2;

/// Where a check-in conversation is.
///
/// ```text
/// Opening ─submit─▶ Gathering(1) ─submit─▶ Gathering(2) ─submit─▶ Finalizing ─▶ Complete
///                        └──────── finish ────────┴──────────────────▲
/// ```
///
/// Any phase before `Complete` can move to `Abandoned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInPhase {
    /// Only the opening message has been shown.
    Opening,
    /// `follow_ups` questions have been asked. `errored` is set after a
    /// failed follow-up request until the next successful one.
    Gathering { follow_ups: u8, errored: bool },
    /// The day analysis call is in flight.
    Finalizing,
    Complete,
    Abandoned,
}

impl CheckInPhase {
    pub fn follow_ups(self) -> u8 {
        match self {
            Self::Gathering { follow_ups, .. } => follow_ups,
            _ => 0,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Abandoned)
    }
}

/// Snapshot of a check-in for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInView {
    pub messages: Vec<ChatMessage>,
    pub phase: CheckInPhase,
    /// Follow-up questions asked so far.
    pub follow_ups_asked: u8,
    /// An analysis call is outstanding.
    pub awaiting: bool,
    /// The user may end the conversation early.
    pub can_finalize: bool,
    pub last_error: Option<String>,
    /// Set once the conversation is complete.
    pub entry: Option<DayEntry>,
    /// Set when the entry was created but could not be stored.
    pub store_warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_ups_only_counted_while_gathering() {
        assert_eq!(CheckInPhase::Opening.follow_ups(), 0);
        assert_eq!(
            CheckInPhase::Gathering {
                follow_ups: 2,
                errored: true
            }
            .follow_ups(),
            2
        );
        assert!(CheckInPhase::Abandoned.is_terminal());
        assert!(!CheckInPhase::Finalizing.is_terminal());
    }
}
