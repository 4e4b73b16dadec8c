//! Configuration models.
//!
//! `AppConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Loading lives in the infrastructure layer.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_HISTORY_WINDOW: usize = 7;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Model settings for the analysis service.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Model used for follow-up questions and companion replies.
    pub chat_model: String,
    /// Model used for structured day analysis.
    pub analysis_model: String,
    pub follow_up_temperature: f64,
    pub companion_temperature: f64,
    /// How many past entries are summarised into the analysis prompt.
    pub history_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            follow_up_temperature: 0.9,
            companion_temperature: 0.8,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

/// Root configuration structure for secret.json
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Deserialize, Serialize, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Overrides `AnalysisConfig::chat_model` when set.
    #[serde(default)]
    pub model_name: Option<String>,
}

// The key must never reach logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[analysis]
analysis_model = "gemini-2.5-pro"
"#,
        )
        .unwrap();
        assert_eq!(config.analysis.analysis_model, "gemini-2.5-pro");
        assert_eq!(config.analysis.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.analysis.history_window, DEFAULT_HISTORY_WINDOW);
    }

    #[test]
    fn test_empty_config() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_gemini_debug_redacts_key() {
        let config = GeminiConfig {
            api_key: "secret-key".to_string(),
            model_name: None,
        };
        assert!(!format!("{config:?}").contains("secret-key"));
    }
}
