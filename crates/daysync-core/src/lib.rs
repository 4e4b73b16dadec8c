//! Domain layer for DaySync.
//!
//! Holds the day entry and chat session models, the repository traits the
//! stores implement, the analysis service boundary and the shared error type.
//! Nothing in this crate performs I/O.

pub mod analysis;
pub mod config;
pub mod entry;
pub mod error;
pub mod repository;
pub mod secret;
pub mod session;

// Re-export common error type
pub use error::{DaySyncError, Result};
