//! Prompt text for the Gemini analysis service.

use daysync_core::entry::DayEntry;

/// Persona and rules shared by every request.
pub const SYSTEM_PROMPT_CORE: &str = "You are Friend&Help, a kind and joyful companion.
Your goal is to bring clarity and happiness to the user's life through simple, empathetic conversation.

APP STRUCTURE KNOWLEDGE:
- check-in: The daily reflection that produces today's happiness score.
- chat: General conversation and support, organised in sessions.
- insights: The happiness trend for the last seven entries.
- advice: Personalised suggestions from the latest entry.

RULES:
1. Be warm, supportive, and positive.
2. Never judge.
3. No medical or diagnostic claims.
4. If distress is high, gently suggest professional support.
5. Use clear, simple language.
6. DO NOT use emojis in your text responses.
7. If the user asks where to find something, guide them to check-in, chat, insights, or advice.";

pub const FOLLOW_UP_ROLE: &str =
    "Be a curious friend. Ask a specific, diverse question that varies from previous sessions.";

pub const ANALYZER_ROLE: &str = "You are a precise emotional analyzer. Evaluate the user's sentiment with high mathematical accuracy.";

pub const COMPANION_ROLE: &str = "You are talking to the user as their friend. Listen to their problems and offer kind, joyful, and simple advice.";

/// Used when the model returns no text for a follow-up question.
pub const FOLLOW_UP_FALLBACK: &str =
    "That sounds interesting. How did it affect your perspective today?";

/// Used when the model returns no text for a companion reply.
pub const COMPANION_FALLBACK: &str = "I am here with you. Tell me more.";

pub fn system_instruction(role: &str) -> String {
    format!("{SYSTEM_PROMPT_CORE} {role}")
}

pub fn follow_up_prompt(last_user_message: &str, conversation_history: &[String]) -> String {
    format!(
        "User said: \"{last_user_message}\". Conversation history: {}. \
         Ask one creative, insightful, and unique follow-up question. \
         DO NOT ask general questions like \"how are you\". \
         Ask something specific to what they said to help them reflect deeply.",
        conversation_history.join(". ")
    )
}

/// Builds the day analysis prompt.
///
/// At most `history_window` past entries (newest first) are summarised so
/// the model has something to base a pattern insight on.
pub fn day_analysis_prompt(
    primary_entry: &str,
    follow_up_responses: &[String],
    past_entries: &[DayEntry],
    history_window: usize,
) -> String {
    let mut prompt = format!(
        "Precisely analyze this day based on these inputs: Primary Entry: \"{primary_entry}\". \
         Follow-up Responses: {}.\n\
         Calculate a precise Happiness Score from 0 to 100 based on sentiment analysis.\n\
         BE ACCURATE: A neutral day should be around 50, a very sad day 10, an ecstatic day 95.\n\
         The score must be based on the emotional weight of the words used. \
         If the user is having a great day, give a high score (80-100). \
         If it's a standard day, give around 50-70. Only give very low scores for genuine sadness.",
        follow_up_responses.join(", ")
    );

    let recent: Vec<&DayEntry> = past_entries.iter().take(history_window).collect();
    if !recent.is_empty() {
        prompt.push_str(
            "\n\nRecent days, newest first. Use them for patternInsight when a pattern is clear:",
        );
        for entry in recent {
            prompt.push_str(&format!(
                "\n- {}: score {}. {}",
                entry.day().format("%Y-%m-%d"),
                entry.happiness_score(),
                entry.analysis.summary
            ));
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use daysync_core::entry::{DayAnalysis, HappinessScore};

    fn past(summary: &str, score: u8) -> DayEntry {
        DayEntry::new(
            "text",
            Vec::new(),
            DayAnalysis {
                summary: summary.to_string(),
                happiness_score: HappinessScore::new(score).unwrap(),
                pattern_insight: None,
                advice: Vec::new(),
                detected_emotions: Vec::new(),
            },
        )
    }

    #[test]
    fn test_follow_up_prompt_embeds_message_and_history() {
        let prompt = follow_up_prompt(
            "Got promoted",
            &["Got promoted".to_string(), "What changed?".to_string()],
        );
        assert!(prompt.contains("User said: \"Got promoted\""));
        assert!(prompt.contains("Got promoted. What changed?"));
    }

    #[test]
    fn test_analysis_prompt_without_history_has_no_history_block() {
        let prompt = day_analysis_prompt("Quiet day", &["Read a book".to_string()], &[], 7);
        assert!(prompt.contains("Primary Entry: \"Quiet day\""));
        assert!(prompt.contains("Follow-up Responses: Read a book."));
        assert!(!prompt.contains("Recent days"));
    }

    #[test]
    fn test_analysis_prompt_limits_history_window() {
        let entries = vec![past("newest", 90), past("middle", 50), past("oldest", 10)];
        let prompt = day_analysis_prompt("x", &[], &entries, 2);

        assert!(prompt.contains("score 90. newest"));
        assert!(prompt.contains("score 50. middle"));
        assert!(!prompt.contains("oldest"));
    }

    #[test]
    fn test_system_instruction_appends_role() {
        let instruction = system_instruction(COMPANION_ROLE);
        assert!(instruction.starts_with("You are Friend&Help"));
        assert!(instruction.ends_with(COMPANION_ROLE));
    }
}
