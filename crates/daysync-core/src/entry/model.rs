//! Day entry domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Upper bound of the happiness scale (inclusive).
pub const MAX_HAPPINESS_SCORE: u8 = 100;

/// Returned when a raw score falls outside `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("happiness score {0} is outside 0..=100")]
pub struct InvalidHappinessScore(pub i64);

/// Integer sentiment metric in `0..=100` assigned by the analysis service.
///
/// The range is checked on construction and on deserialization, so every
/// `HappinessScore` in memory is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct HappinessScore(u8);

impl HappinessScore {
    pub fn new(value: u8) -> Result<Self, InvalidHappinessScore> {
        if value > MAX_HAPPINESS_SCORE {
            return Err(InvalidHappinessScore(i64::from(value)));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for HappinessScore {
    type Error = InvalidHappinessScore;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_HAPPINESS_SCORE)
            .map(Self)
            .ok_or(InvalidHappinessScore(value))
    }
}

impl From<HappinessScore> for u8 {
    fn from(score: HappinessScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for HappinessScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structured result of analysing one day.
///
/// Produced entirely by the analysis service. The pipeline treats it as
/// opaque apart from the score range, which aggregation relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAnalysis {
    /// One or two sentence summary of the day.
    pub summary: String,
    pub happiness_score: HappinessScore,
    /// Longer-term observation across entries, when the service found one.
    pub pattern_insight: Option<String>,
    /// Action items, in presentation order.
    pub advice: Vec<String>,
    /// Emotions detected in the entry. Unique, in first-seen order.
    pub detected_emotions: Vec<String>,
}

/// A finalized daily reflection.
///
/// Created exactly once when a check-in is finalized and never mutated
/// afterwards. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Unique entry identifier (UUID format)
    pub id: String,
    /// When the check-in was finalized
    pub date: DateTime<Utc>,
    /// The primary entry: the first thing the user said
    pub content: String,
    /// The user's answers to follow-up questions, in order
    pub follow_ups: Vec<String>,
    pub analysis: DayAnalysis,
}

impl DayEntry {
    /// Creates an entry with a fresh id, stamped with the current time.
    pub fn new(content: impl Into<String>, follow_ups: Vec<String>, analysis: DayAnalysis) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            content: content.into(),
            follow_ups,
            analysis,
        }
    }

    /// Calendar day of this entry (UTC), used for the one-entry-per-day check.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn happiness_score(&self) -> u8 {
        self.analysis.happiness_score.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(score: u8) -> DayAnalysis {
        DayAnalysis {
            summary: "A calm day".to_string(),
            happiness_score: HappinessScore::new(score).unwrap(),
            pattern_insight: None,
            advice: vec!["Take a walk".to_string()],
            detected_emotions: vec!["calm".to_string()],
        }
    }

    #[test]
    fn test_score_bounds() {
        assert!(HappinessScore::new(0).is_ok());
        assert!(HappinessScore::new(100).is_ok());
        assert_eq!(HappinessScore::new(101), Err(InvalidHappinessScore(101)));
        assert_eq!(HappinessScore::try_from(-1), Err(InvalidHappinessScore(-1)));
        assert_eq!(HappinessScore::try_from(300), Err(InvalidHappinessScore(300)));
        assert_eq!(HappinessScore::try_from(72).unwrap().value(), 72);
    }

    #[test]
    fn test_score_deserialization_rejects_out_of_range() {
        let ok: HappinessScore = serde_json::from_str("55").unwrap();
        assert_eq!(ok.value(), 55);
        assert!(serde_json::from_str::<HappinessScore>("140").is_err());
        assert!(serde_json::from_str::<HappinessScore>("-3").is_err());
    }

    #[test]
    fn test_new_entry_has_unique_id_and_today() {
        let a = DayEntry::new("Had a great day", Vec::new(), analysis(80));
        let b = DayEntry::new("Had a great day", Vec::new(), analysis(80));
        assert_ne!(a.id, b.id);
        assert_eq!(a.day(), Utc::now().date_naive());
        assert_eq!(a.happiness_score(), 80);
        assert!(a.follow_ups.is_empty());
    }
}
