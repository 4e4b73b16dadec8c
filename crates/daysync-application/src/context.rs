//! Application context.
//!
//! Everything the controllers share is held here and passed in explicitly:
//! the two stores, the analysis service and the companion selection.

use crate::advice::AdvicePresenter;
use crate::check_in::CheckInController;
use crate::companion::{CompanionController, SessionSelection};
use crate::insights::InsightsAggregator;
use crate::today::TodayStatus;
use chrono::Utc;
use daysync_core::Result;
use daysync_core::analysis::AnalysisService;
use daysync_core::entry::EntryRepository;
use daysync_core::session::ChatSessionRepository;
use daysync_infrastructure::{
    DaySyncPaths, InMemoryChatSessionRepository, InMemoryEntryRepository,
    TomlChatSessionRepository, TomlEntryRepository,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub entries: Arc<dyn EntryRepository>,
    pub sessions: Arc<dyn ChatSessionRepository>,
    pub analysis: Arc<dyn AnalysisService>,
    pub selection: SessionSelection,
}

impl AppContext {
    pub fn new(
        entries: Arc<dyn EntryRepository>,
        sessions: Arc<dyn ChatSessionRepository>,
        analysis: Arc<dyn AnalysisService>,
    ) -> Self {
        Self {
            entries,
            sessions,
            analysis,
            selection: SessionSelection::new(),
        }
    }

    /// Context backed by `entries.toml` and `sessions.toml` in the data
    /// directory.
    pub fn with_file_stores(paths: &DaySyncPaths, analysis: Arc<dyn AnalysisService>) -> Self {
        tracing::debug!("[AppContext] Using data directory {:?}", paths.data_dir());
        Self::new(
            Arc::new(TomlEntryRepository::new(paths.entries_file())),
            Arc::new(TomlChatSessionRepository::new(paths.sessions_file())),
            analysis,
        )
    }

    /// Context whose stores live only in memory.
    pub fn ephemeral(analysis: Arc<dyn AnalysisService>) -> Self {
        Self::new(
            Arc::new(InMemoryEntryRepository::new()),
            Arc::new(InMemoryChatSessionRepository::new()),
            analysis,
        )
    }

    pub fn check_in(&self) -> CheckInController {
        CheckInController::new(self.entries.clone(), self.analysis.clone())
    }

    pub fn companion(&self) -> CompanionController {
        CompanionController::new(
            self.sessions.clone(),
            self.analysis.clone(),
            self.selection.clone(),
        )
    }

    pub fn insights(&self) -> InsightsAggregator {
        InsightsAggregator::new(self.entries.clone())
    }

    pub fn advice(&self) -> AdvicePresenter {
        AdvicePresenter::new(self.entries.clone())
    }

    /// Today's status by the current UTC date.
    pub async fn today(&self) -> Result<TodayStatus> {
        let entries = self.entries.load_entries().await?;
        Ok(TodayStatus::from_entries(&entries, Utc::now().date_naive()))
    }

    /// Deletes every entry and session.
    pub async fn wipe(&self) -> Result<()> {
        self.entries.clear().await?;
        self.sessions.clear().await?;
        self.selection.set(None).await;
        tracing::info!("[AppContext] All entries and sessions deleted");
        Ok(())
    }
}
