//! Repository trait re-exports.
//!
//! This module provides centralized access to all repository traits.

pub use crate::entry::EntryRepository;
pub use crate::session::ChatSessionRepository;
