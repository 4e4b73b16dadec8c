//! Multi-session companion chat.

mod controller;
mod outcome;
mod selection;

pub use controller::{
    CompanionController, DEFAULT_SESSION_OPENING, DEFAULT_SESSION_TITLE, NEW_SESSION_OPENING,
    NEW_SESSION_TITLE, SessionSummary,
};
pub use outcome::{CompanionOutcome, CompanionRejection};
pub use selection::SessionSelection;
