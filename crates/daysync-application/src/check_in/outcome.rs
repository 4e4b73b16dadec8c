use daysync_core::analysis::AnalysisError;
use daysync_core::entry::DayEntry;

/// Why an input or finish request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInRejection {
    /// The text was empty after trimming.
    EmptyInput,
    /// An analysis call for this conversation is still outstanding.
    Busy,
    /// The day analysis is running.
    Finalizing,
    /// Finishing early needs at least one answered follow-up question.
    NotReady,
    /// The conversation is complete or abandoned.
    Closed,
}

/// Result of [`submit`](super::CheckInController::submit) or
/// [`finish`](super::CheckInController::finish).
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInOutcome {
    /// A follow-up question was appended.
    FollowUp { question: String },
    /// The follow-up request failed; the apology message was appended and
    /// the phase is unchanged.
    Recovered { error: AnalysisError },
    /// The entry was created. `store_warning` is set when it could not be
    /// written to the entry store.
    Completed {
        entry: DayEntry,
        store_warning: Option<String>,
    },
    /// The day analysis failed; the conversation is back where it was.
    FinalizeFailed { error: AnalysisError },
    /// The request was a no-op.
    Rejected(CheckInRejection),
    /// The conversation was abandoned while the call was in flight and the
    /// response was dropped.
    Discarded,
}

impl CheckInOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
