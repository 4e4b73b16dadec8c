//! Rolling happiness statistics over the entry store.

use chrono::{DateTime, Utc};
use daysync_core::Result;
use daysync_core::entry::{DayEntry, EntryRepository};
use std::sync::Arc;

/// Number of most recent entries charted.
pub const INSIGHTS_WINDOW: usize = 7;

/// Headline shown before any entry has a pattern insight.
pub const GATHERING_PLACEHOLDER: &str = "Synchronizing with your patterns...";

/// One charted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPoint {
    pub entry_id: String,
    pub date: DateTime<Utc>,
    /// Short weekday name of `date` in UTC, e.g. "Mon".
    pub weekday: String,
    pub score: u8,
}

/// A chart column: a data point or an empty placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSlot {
    Filled(DataPoint),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsReport {
    /// The last seven entries by date, oldest first.
    pub window: Vec<DataPoint>,
    /// Rounded mean score of `window`; 0 when it is empty.
    pub mean: u8,
    /// Exactly [`INSIGHTS_WINDOW`] slots: the window, then empty padding.
    pub slots: Vec<ChartSlot>,
    pub headline: String,
}

/// `round(sum / max(1, n))`. Halves round up.
pub fn mean_score(scores: &[u8]) -> u8 {
    let sum: u32 = scores.iter().map(|&s| u32::from(s)).sum();
    let count = scores.len().max(1) as u32;
    // Scores are at most 100, so the mean fits in a u8.
    ((sum + count / 2) / count) as u8
}

/// Computes the insights report from entries in store order (newest first).
pub fn compute_insights(entries: &[DayEntry]) -> InsightsReport {
    let mut by_date: Vec<&DayEntry> = entries.iter().collect();
    by_date.sort_by_key(|e| e.date);
    let start = by_date.len().saturating_sub(INSIGHTS_WINDOW);

    let window: Vec<DataPoint> = by_date[start..]
        .iter()
        .map(|entry| DataPoint {
            entry_id: entry.id.clone(),
            date: entry.date,
            weekday: entry.date.format("%a").to_string(),
            score: entry.happiness_score(),
        })
        .collect();

    let scores: Vec<u8> = window.iter().map(|p| p.score).collect();
    let mean = mean_score(&scores);

    let mut slots: Vec<ChartSlot> = window.iter().cloned().map(ChartSlot::Filled).collect();
    slots.resize(INSIGHTS_WINDOW, ChartSlot::Empty);

    let headline = entries
        .first()
        .and_then(|e| e.analysis.pattern_insight.clone())
        .unwrap_or_else(|| GATHERING_PLACEHOLDER.to_string());

    InsightsReport {
        window,
        mean,
        slots,
        headline,
    }
}

/// Read-only view over the entry store.
pub struct InsightsAggregator {
    entries: Arc<dyn EntryRepository>,
}

impl InsightsAggregator {
    pub fn new(entries: Arc<dyn EntryRepository>) -> Self {
        Self { entries }
    }

    pub async fn report(&self) -> Result<InsightsReport> {
        let entries = self.entries.load_entries().await?;
        Ok(compute_insights(&entries))
    }
}
