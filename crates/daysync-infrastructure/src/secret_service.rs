//! Secret service implementation.
//!
//! This module provides a service for loading secret configuration (API keys)
//! stored in secret.json, with the `GEMINI_API_KEY` environment variable as a
//! fallback.

use async_trait::async_trait;
use daysync_core::config::{GeminiConfig, SecretConfig};
use daysync_core::secret::SecretService;
use daysync_core::{DaySyncError, Result};
use std::path::{Path, PathBuf};

/// Environment variable consulted when secret.json holds no key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Service for loading secret configuration.
///
/// # Example
///
/// ```ignore
/// use daysync_infrastructure::{DaySyncPaths, SecretServiceImpl};
/// use daysync_core::secret::SecretService;
///
/// let paths = DaySyncPaths::resolve()?;
/// let service = SecretServiceImpl::new(paths.secret_file());
/// let secrets = service.load_secrets().await?;
/// ```
#[derive(Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    env_api_key: Option<String>,
}

impl SecretServiceImpl {
    /// Creates a service reading `path`, capturing `GEMINI_API_KEY` now.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let env_api_key = std::env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::with_env_key(path, env_api_key)
    }

    /// Creates a service with an explicit fallback key instead of the
    /// process environment.
    pub fn with_env_key(path: impl Into<PathBuf>, env_api_key: Option<String>) -> Self {
        Self {
            path: path.into(),
            env_api_key,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<SecretConfig> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SecretConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(SecretConfig::default());
        }

        serde_json::from_str(&content)
            .map_err(|e| DaySyncError::config(format!("Invalid secret file {:?}: {}", self.path, e)))
    }
}

#[async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        let mut secrets = self.read_file().await?;

        let has_file_key = secrets
            .gemini
            .as_ref()
            .is_some_and(|gemini| !gemini.api_key.trim().is_empty());

        if !has_file_key {
            if let Some(api_key) = self.env_api_key.clone() {
                tracing::debug!("[SecretService] Using API key from {}", GEMINI_API_KEY_ENV);
                let model_name = secrets.gemini.and_then(|gemini| gemini.model_name);
                secrets.gemini = Some(GeminiConfig {
                    api_key,
                    model_name,
                });
            }
        }

        Ok(secrets)
    }

    async fn secret_file_exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_key_wins_over_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(
            &path,
            r#"{"gemini":{"api_key":"from-file","model_name":"gemini-2.5-flash"}}"#,
        )
        .unwrap();

        let service = SecretServiceImpl::with_env_key(&path, Some("from-env".to_string()));
        let gemini = service.load_secrets().await.unwrap().gemini.unwrap();
        assert_eq!(gemini.api_key, "from-file");
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-2.5-flash"));
        assert!(service.secret_file_exists().await);
    }

    #[tokio::test]
    async fn test_env_fallback_when_file_key_blank() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, r#"{"gemini":{"api_key":"","model_name":"custom"}}"#).unwrap();

        let service = SecretServiceImpl::with_env_key(&path, Some("from-env".to_string()));
        let gemini = service.load_secrets().await.unwrap().gemini.unwrap();
        assert_eq!(gemini.api_key, "from-env");
        assert_eq!(gemini.model_name.as_deref(), Some("custom"));
    }

    #[tokio::test]
    async fn test_missing_file_without_env_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let service = SecretServiceImpl::with_env_key(temp_dir.path().join("secret.json"), None);

        assert!(service.load_secrets().await.unwrap().gemini.is_none());
        assert!(!service.secret_file_exists().await);
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, "{not json").unwrap();

        let service = SecretServiceImpl::with_env_key(&path, Some("k".to_string()));
        assert!(service.load_secrets().await.unwrap_err().is_config());
    }
}
