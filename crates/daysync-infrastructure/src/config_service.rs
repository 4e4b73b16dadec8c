//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the application
//! configuration from `config.toml` in the config directory.

use daysync_core::config::AppConfig;
use daysync_core::{DaySyncError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the application configuration.
///
/// A missing file yields the defaults. A file that exists but cannot be
/// parsed is an error, so a typo never silently resets the model settings.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, filled on first successful load.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load_config(&self) -> Result<AppConfig> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "[ConfigService] {:?} not found, using defaults",
                    self.path
                );
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content).map_err(|e| {
            DaySyncError::config(format!("Invalid config file {:?}: {}", self.path, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daysync_core::config::DEFAULT_CHAT_MODEL;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));

        let config = service.get_config().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.analysis.chat_model, DEFAULT_CHAT_MODEL);
    }

    #[test]
    fn test_config_is_cached_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nhistory_window = 3\n").unwrap();
        let service = ConfigService::new(&path);

        assert_eq!(service.get_config().unwrap().analysis.history_window, 3);

        std::fs::write(&path, "[analysis]\nhistory_window = 10\n").unwrap();
        assert_eq!(service.get_config().unwrap().analysis.history_window, 3);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().analysis.history_window, 10);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analysis\n").unwrap();

        let err = ConfigService::new(&path).get_config().unwrap_err();
        assert!(err.is_config());
    }
}
