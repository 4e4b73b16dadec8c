//! Guided daily check-in.
//!
//! # Module Structure
//!
//! - `state`: Conversation phases and the view snapshot handed to callers
//! - `outcome`: Result of one submit/finalize call
//! - `controller`: The turn-budgeted state machine

mod controller;
mod outcome;
mod state;

pub use controller::CheckInController;
pub use outcome::{CheckInOutcome, CheckInRejection};
pub use state::{
    APOLOGY_MESSAGE, CheckInPhase, CheckInView, MAX_FOLLOW_UPS, OPENING_MESSAGE,
};
