//! Structured day analysis: the response schema sent to Gemini and the
//! strict validation applied to what comes back.

use daysync_core::analysis::AnalysisError;
use daysync_core::entry::{DayAnalysis, HappinessScore};
use serde::Deserialize;
use serde_json::{Value, json};

/// Response schema in Gemini's OpenAPI subset.
pub fn day_analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "happinessScore": {
                "type": "INTEGER",
                "description": "A precise integer from 0 to 100 representing happiness level."
            },
            "patternInsight": { "type": "STRING" },
            "advice": { "type": "ARRAY", "items": { "type": "STRING" } },
            "detectedEmotions": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["summary", "happinessScore", "advice", "detectedEmotions"]
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDayAnalysis {
    summary: String,
    happiness_score: serde_json::Number,
    #[serde(default)]
    pattern_insight: Option<String>,
    advice: Vec<String>,
    detected_emotions: Vec<String>,
}

/// Parses and validates the model's JSON text.
///
/// Required fields must be present with the right types and the score must
/// be a whole number in `0..=100`. A blank `patternInsight` counts as absent
/// and repeated emotions are dropped, keeping first-seen order.
pub fn parse_day_analysis(text: &str) -> Result<DayAnalysis, AnalysisError> {
    let raw: RawDayAnalysis = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

    let happiness_score = score_from_number(&raw.happiness_score)?;

    let pattern_insight = raw
        .pattern_insight
        .map(|insight| insight.trim().to_string())
        .filter(|insight| !insight.is_empty());

    let mut detected_emotions: Vec<String> = Vec::with_capacity(raw.detected_emotions.len());
    for emotion in raw.detected_emotions {
        let emotion = emotion.trim();
        if !emotion.is_empty() && !detected_emotions.iter().any(|seen| seen == emotion) {
            detected_emotions.push(emotion.to_string());
        }
    }

    Ok(DayAnalysis {
        summary: raw.summary,
        happiness_score,
        pattern_insight,
        advice: raw.advice,
        detected_emotions,
    })
}

fn score_from_number(number: &serde_json::Number) -> Result<HappinessScore, AnalysisError> {
    let whole = match number.as_i64() {
        Some(value) => value,
        None => match number.as_f64() {
            Some(value) if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 => value as i64,
            _ => {
                return Err(AnalysisError::Malformed(format!(
                    "happinessScore {number} is not an integer"
                )));
            }
        },
    };

    HappinessScore::try_from(whole).map_err(|e| AnalysisError::Malformed(e.to_string()))
}

// The JSON response mode should return bare JSON, but fenced output still
// shows up occasionally.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "summary": "A productive day with a good walk.",
        "happinessScore": 72,
        "patternInsight": "You feel better on days you go outside.",
        "advice": ["Walk again tomorrow", "Sleep before midnight"],
        "detectedEmotions": ["content", "tired", "content"]
    }"#;

    #[test]
    fn test_valid_analysis_parses_and_dedupes_emotions() {
        let analysis = parse_day_analysis(VALID).unwrap();
        assert_eq!(analysis.happiness_score.value(), 72);
        assert_eq!(analysis.advice.len(), 2);
        assert_eq!(analysis.detected_emotions, vec!["content", "tired"]);
        assert!(analysis.pattern_insight.is_some());
    }

    #[test]
    fn test_blank_or_missing_pattern_insight_is_none() {
        let blank = VALID.replace(
            "\"You feel better on days you go outside.\"",
            "\"   \"",
        );
        assert_eq!(parse_day_analysis(&blank).unwrap().pattern_insight, None);

        let missing = r#"{"summary":"s","happinessScore":50,"advice":[],"detectedEmotions":[]}"#;
        assert_eq!(parse_day_analysis(missing).unwrap().pattern_insight, None);
    }

    #[test]
    fn test_out_of_range_score_is_malformed() {
        for score in ["101", "-1", "72.5"] {
            let text = VALID.replace("72", score);
            let err = parse_day_analysis(&text).unwrap_err();
            assert!(err.is_malformed(), "score {score} should be rejected");
        }
    }

    #[test]
    fn test_whole_float_score_is_accepted() {
        let text = VALID.replace("72", "64.0");
        assert_eq!(parse_day_analysis(&text).unwrap().happiness_score.value(), 64);
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let text = r#"{"summary":"s","happinessScore":50,"advice":[]}"#;
        let err = parse_day_analysis(text).unwrap_err();
        assert!(err.to_string().contains("detectedEmotions"));
    }

    #[test]
    fn test_non_json_is_malformed() {
        assert!(parse_day_analysis("I could not analyse that.").unwrap_err().is_malformed());
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let fenced = format!("```json\n{VALID}\n```");
        assert!(parse_day_analysis(&fenced).is_ok());
    }

    #[test]
    fn test_schema_lists_required_fields() {
        let schema = day_analysis_response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert!(!required.contains(&json!("patternInsight")));
    }
}
