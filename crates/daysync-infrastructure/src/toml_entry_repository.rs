//! TOML-based EntryRepository implementation

use crate::dto::EntriesDocument;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use daysync_core::entry::{DayEntry, EntryRepository};
use daysync_core::{DaySyncError, Result};
use std::path::{Path, PathBuf};

/// Stores every completed day entry in one TOML document.
///
/// The file is created on first save; a missing or blank file loads as an
/// empty history. A file that cannot be parsed, or that holds an
/// out-of-range score, is reported as an error and never overwritten by a
/// load.
#[derive(Clone)]
pub struct TomlEntryRepository {
    file: AtomicTomlFile<EntriesDocument>,
}

impl TomlEntryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicTomlFile::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl EntryRepository for TomlEntryRepository {
    async fn load_entries(&self) -> Result<Vec<DayEntry>> {
        let file = self.file.clone();
        let document = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| DaySyncError::internal(format!("Failed to join task: {}", e)))??;

        let entries = match document {
            Some(document) => document.into_domain()?,
            None => Vec::new(),
        };
        tracing::debug!(
            "[TomlEntryRepository] Loaded {} entries from {:?}",
            entries.len(),
            self.file.path()
        );
        Ok(entries)
    }

    async fn save_entries(&self, entries: &[DayEntry]) -> Result<()> {
        let document = EntriesDocument::from_domain(entries);
        let count = document.entries.len();
        let file = self.file.clone();

        tokio::task::spawn_blocking(move || file.save(&document))
            .await
            .map_err(|e| DaySyncError::internal(format!("Failed to join task: {}", e)))??;

        tracing::debug!(
            "[TomlEntryRepository] Saved {} entries to {:?}",
            count,
            self.file.path()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daysync_core::entry::{DayAnalysis, HappinessScore};
    use tempfile::TempDir;

    fn entry(content: &str, score: u8) -> DayEntry {
        DayEntry::new(
            content,
            vec!["follow-up answer".to_string()],
            DayAnalysis {
                summary: format!("Summary of {content}"),
                happiness_score: HappinessScore::new(score).unwrap(),
                pattern_insight: Some("Evenings lift your mood".to_string()),
                advice: vec!["Sleep early".to_string(), "Call a friend".to_string()],
                detected_emotions: vec!["tired".to_string()],
            },
        )
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlEntryRepository::new(temp_dir.path().join("entries.toml"));

        assert!(repo.load_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlEntryRepository::new(temp_dir.path().join("entries.toml"));

        let newest = entry("today", 80);
        let older = entry("yesterday", 40);
        repo.save_entries(&[newest.clone(), older.clone()])
            .await
            .unwrap();

        let loaded = repo.load_entries().await.unwrap();
        assert_eq!(loaded, vec![newest, older]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error_not_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.toml");
        std::fs::write(&path, "schema_version = \"1.0.0\"\nentries = 7").unwrap();

        let repo = TomlEntryRepository::new(&path);
        let err = repo.load_entries().await.unwrap_err();
        assert!(err.is_serialization());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_out_of_range_score_on_disk_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlEntryRepository::new(temp_dir.path().join("entries.toml"));
        repo.save_entries(&[entry("fine", 50)]).await.unwrap();

        let content = std::fs::read_to_string(repo.path()).unwrap();
        std::fs::write(
            repo.path(),
            content.replace("happiness_score = 50", "happiness_score = 250"),
        )
        .unwrap();

        assert!(repo.load_entries().await.unwrap_err().is_serialization());
    }

    #[tokio::test]
    async fn test_clear_empties_the_store() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlEntryRepository::new(temp_dir.path().join("entries.toml"));
        repo.save_entries(&[entry("a", 10)]).await.unwrap();

        repo.clear().await.unwrap();
        assert!(repo.load_entries().await.unwrap().is_empty());
    }
}
