//! Data Transfer Objects (DTOs) for persistence.
//!
//! On-disk documents are decoupled from the domain models. Each document
//! carries a `schema_version` so a later format can be recognised and
//! migrated on load.

mod entry;
mod session;

pub use entry::{DayAnalysisV1_0_0, DayEntryV1_0_0, ENTRIES_SCHEMA_VERSION, EntriesDocument};
pub use session::{
    ChatMessageV1_0_0, ChatSessionV1_0_0, MessageRoleV1_0_0, SESSIONS_SCHEMA_VERSION,
    SessionsDocument,
};

use daysync_core::DaySyncError;

/// Rejects documents written by an unknown format.
pub(crate) fn check_schema_version(
    document: &str,
    found: &str,
    supported: &str,
) -> Result<(), DaySyncError> {
    if found == supported {
        return Ok(());
    }
    Err(DaySyncError::Serialization {
        format: "TOML".to_string(),
        message: format!(
            "{document} has unsupported schema_version '{found}' (expected '{supported}')"
        ),
    })
}
