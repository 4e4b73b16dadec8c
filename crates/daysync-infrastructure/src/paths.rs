//! Unified path management for DaySync files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/daysync/           # Config directory
//! ├── config.toml              # Model settings
//! └── secret.json              # API keys
//!
//! ~/.local/share/daysync/      # Data directory
//! ├── entries.toml             # Completed day entries
//! └── sessions.toml            # Companion chat sessions
//! ```

use daysync_core::config::{GeminiConfig, SecretConfig};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "daysync";

/// Errors that can occur during path resolution.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Platform directory could not be determined.
    #[error("Cannot determine the {0} directory")]
    DirNotFound(&'static str),
}

/// Resolved locations of every DaySync file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySyncPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl DaySyncPaths {
    /// Platform defaults (XDG on Linux, the native equivalents elsewhere).
    pub fn resolve() -> Result<Self, PathError> {
        let config_dir = dirs::config_dir()
            .ok_or(PathError::DirNotFound("config"))?
            .join(APP_DIR);
        let data_dir = dirs::data_dir()
            .ok_or(PathError::DirNotFound("data"))?
            .join(APP_DIR);
        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Explicit directories, used by tests and the `--data-dir` flag.
    pub fn with_dirs(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Replaces the data directory, keeping the config directory.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    pub fn entries_file(&self) -> PathBuf {
        self.data_dir.join("entries.toml")
    }

    pub fn sessions_file(&self) -> PathBuf {
        self.data_dir.join("sessions.toml")
    }

    /// Ensures the secret file exists, creating a template if it doesn't.
    ///
    /// The template has an empty Gemini key for the user to fill in. On Unix
    /// the file is created with mode 600.
    pub fn ensure_secret_file(&self) -> std::io::Result<PathBuf> {
        let secret_path = self.secret_file();
        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: None,
            }),
        };
        let template_json = serde_json::to_string_pretty(&template).map_err(std::io::Error::other)?;
        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&secret_path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(secret_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_layout() {
        let paths = DaySyncPaths::with_dirs("/cfg", "/data");
        assert_eq!(paths.config_file(), PathBuf::from("/cfg/config.toml"));
        assert_eq!(paths.secret_file(), PathBuf::from("/cfg/secret.json"));
        assert_eq!(paths.entries_file(), PathBuf::from("/data/entries.toml"));
        assert_eq!(paths.sessions_file(), PathBuf::from("/data/sessions.toml"));
    }

    #[test]
    fn test_with_data_dir_keeps_config() {
        let paths = DaySyncPaths::with_dirs("/cfg", "/data").with_data_dir("/elsewhere");
        assert_eq!(paths.config_dir(), Path::new("/cfg"));
        assert_eq!(paths.entries_file(), PathBuf::from("/elsewhere/entries.toml"));
    }

    #[test]
    fn test_ensure_secret_file_creates_template_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DaySyncPaths::with_dirs(temp_dir.path().join("cfg"), temp_dir.path());

        let path = paths.ensure_secret_file().unwrap();
        let template: SecretConfig =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(template.gemini.unwrap().api_key, "");

        std::fs::write(&path, r#"{"gemini":{"api_key":"k"}}"#).unwrap();
        paths.ensure_secret_file().unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"k\""));
    }
}
