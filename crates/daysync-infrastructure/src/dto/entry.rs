//! Day entry DTOs.

use chrono::{DateTime, Utc};
use daysync_core::DaySyncError;
use daysync_core::entry::{DayAnalysis, DayEntry, HappinessScore};
use serde::{Deserialize, Serialize};

use super::check_schema_version;

pub const ENTRIES_SCHEMA_VERSION: &str = "1.0.0";

/// Root of `entries.toml`. Entries are stored newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntriesDocument {
    pub schema_version: String,
    #[serde(default)]
    pub entries: Vec<DayEntryV1_0_0>,
}

/// V1.0.0: day analysis as stored on disk.
///
/// The score is kept as a plain integer here and range-checked when the
/// document is converted back to the domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAnalysisV1_0_0 {
    pub summary: String,
    pub happiness_score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_insight: Option<String>,
    #[serde(default)]
    pub advice: Vec<String>,
    #[serde(default)]
    pub detected_emotions: Vec<String>,
}

/// V1.0.0: one finalized check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntryV1_0_0 {
    pub id: String,
    pub date: DateTime<Utc>,
    pub content: String,
    #[serde(default)]
    pub follow_ups: Vec<String>,
    pub analysis: DayAnalysisV1_0_0,
}

impl From<&DayEntry> for DayEntryV1_0_0 {
    fn from(entry: &DayEntry) -> Self {
        let analysis = &entry.analysis;
        Self {
            id: entry.id.clone(),
            date: entry.date,
            content: entry.content.clone(),
            follow_ups: entry.follow_ups.clone(),
            analysis: DayAnalysisV1_0_0 {
                summary: analysis.summary.clone(),
                happiness_score: i64::from(analysis.happiness_score.value()),
                pattern_insight: analysis.pattern_insight.clone(),
                advice: analysis.advice.clone(),
                detected_emotions: analysis.detected_emotions.clone(),
            },
        }
    }
}

impl TryFrom<DayEntryV1_0_0> for DayEntry {
    type Error = DaySyncError;

    fn try_from(dto: DayEntryV1_0_0) -> Result<Self, Self::Error> {
        let happiness_score =
            HappinessScore::try_from(dto.analysis.happiness_score).map_err(|e| {
                DaySyncError::Serialization {
                    format: "TOML".to_string(),
                    message: format!("entry '{}': {}", dto.id, e),
                }
            })?;

        Ok(DayEntry {
            id: dto.id,
            date: dto.date,
            content: dto.content,
            follow_ups: dto.follow_ups,
            analysis: DayAnalysis {
                summary: dto.analysis.summary,
                happiness_score,
                pattern_insight: dto.analysis.pattern_insight,
                advice: dto.analysis.advice,
                detected_emotions: dto.analysis.detected_emotions,
            },
        })
    }
}

impl EntriesDocument {
    pub fn from_domain(entries: &[DayEntry]) -> Self {
        Self {
            schema_version: ENTRIES_SCHEMA_VERSION.to_string(),
            entries: entries.iter().map(DayEntryV1_0_0::from).collect(),
        }
    }

    /// Converts back to domain entries, preserving stored order.
    ///
    /// Fails on the first invalid record rather than dropping it.
    pub fn into_domain(self) -> Result<Vec<DayEntry>, DaySyncError> {
        check_schema_version("entries.toml", &self.schema_version, ENTRIES_SCHEMA_VERSION)?;
        self.entries.into_iter().map(DayEntry::try_from).collect()
    }
}
