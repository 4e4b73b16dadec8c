//! Day entry domain module.
//!
//! A `DayEntry` is the finalized record of one guided check-in: the user's
//! primary entry, their answers to follow-up questions and the analysis the
//! analysis service derived from them.
//!
//! # Module Structure
//!
//! - `model`: `DayEntry`, `DayAnalysis`, `HappinessScore`
//! - `repository`: Repository trait for whole-collection entry persistence

mod model;
mod repository;

pub use model::{DayAnalysis, DayEntry, HappinessScore, InvalidHappinessScore};
pub use repository::EntryRepository;
