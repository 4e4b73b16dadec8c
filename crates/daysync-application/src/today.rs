//! Whether today's check-in is still needed.
//!
//! The entry store does not enforce one entry per day; callers use this
//! check before opening a check-in.

use chrono::NaiveDate;
use daysync_core::entry::DayEntry;

pub const REMINDER_TEXT: &str = "Time for your daily sync! How are you feeling today?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayStatus {
    pub today: NaiveDate,
    /// The first stored entry dated `today` (UTC), if any.
    pub entry: Option<DayEntry>,
}

impl TodayStatus {
    pub fn from_entries(entries: &[DayEntry], today: NaiveDate) -> Self {
        Self {
            today,
            entry: entries.iter().find(|e| e.day() == today).cloned(),
        }
    }

    pub fn needs_check_in(&self) -> bool {
        self.entry.is_none()
    }

    pub fn reminder(&self) -> Option<&'static str> {
        self.needs_check_in().then_some(REMINDER_TEXT)
    }
}
