//! Application layer for DaySync.
//!
//! Coordinates the domain models, the stores and the analysis service:
//! the check-in and companion controllers, the read-only insights and advice
//! views, and the context that wires them together.

pub mod advice;
pub mod check_in;
pub mod companion;
pub mod context;
pub mod insights;
pub mod today;
pub mod turn;

#[cfg(test)]
mod test_support;

pub use advice::{AdviceList, AdvicePresenter, RankedAdvice};
pub use check_in::{CheckInController, CheckInOutcome, CheckInPhase, CheckInRejection, CheckInView};
pub use companion::{
    CompanionController, CompanionOutcome, CompanionRejection, SessionSelection, SessionSummary,
};
pub use context::AppContext;
pub use insights::{ChartSlot, DataPoint, InsightsAggregator, InsightsReport};
pub use today::TodayStatus;
