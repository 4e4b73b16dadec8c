//! Hand-written mocks shared by the controller tests.

use async_trait::async_trait;
use daysync_core::analysis::{AnalysisError, AnalysisService};
use daysync_core::entry::{DayAnalysis, DayEntry, EntryRepository, HappinessScore};
use daysync_core::session::{ChatMessage, ChatSession, ChatSessionRepository};
use daysync_core::{DaySyncError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

pub fn analysis(score: u8) -> DayAnalysis {
    DayAnalysis {
        summary: format!("A day scored {score}"),
        happiness_score: HappinessScore::new(score).unwrap(),
        pattern_insight: Some(format!("Insight for {score}")),
        advice: vec!["Drink water".to_string(), "Go outside".to_string()],
        detected_emotions: vec!["calm".to_string()],
    }
}

pub fn entry_at(days_ago: i64, score: u8) -> DayEntry {
    let mut entry = DayEntry::new(format!("entry {days_ago}"), Vec::new(), analysis(score));
    entry.date = chrono::Utc::now() - chrono::Duration::days(days_ago);
    entry
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    FollowUp {
        last_user_message: String,
        history: Vec<String>,
    },
    DayAnalysis {
        primary_entry: String,
        follow_ups: Vec<String>,
        past_entries: usize,
    },
    CompanionReply {
        message: String,
        history: Vec<ChatMessage>,
    },
}

/// Analysis service answering from queued results.
///
/// Empty queues fall back to a successful canned answer. When built with
/// [`ScriptedAnalysisService::gated`], every call waits for [`release`]
/// after signalling [`wait_started`].
///
/// [`release`]: ScriptedAnalysisService::release
/// [`wait_started`]: ScriptedAnalysisService::wait_started
#[derive(Default)]
pub struct ScriptedAnalysisService {
    follow_ups: Mutex<VecDeque<std::result::Result<String, AnalysisError>>>,
    analyses: Mutex<VecDeque<std::result::Result<DayAnalysis, AnalysisError>>>,
    replies: Mutex<VecDeque<std::result::Result<String, AnalysisError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    gated: bool,
    started: Notify,
    release: Notify,
}

impl ScriptedAnalysisService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::default()
        }
    }

    pub fn push_follow_up(&self, result: std::result::Result<String, AnalysisError>) {
        self.follow_ups.lock().unwrap().push_back(result);
    }

    pub fn push_analysis(&self, result: std::result::Result<DayAnalysis, AnalysisError>) {
        self.analyses.lock().unwrap().push_back(result);
    }

    pub fn push_reply(&self, result: std::result::Result<String, AnalysisError>) {
        self.replies.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn follow_up_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RecordedCall::FollowUp { .. }))
            .count()
    }

    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn enter(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
        if self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }
    }
}

pub fn transport_error() -> AnalysisError {
    AnalysisError::Transport {
        message: "connection reset".to_string(),
        is_retryable: true,
    }
}

#[async_trait]
impl AnalysisService for ScriptedAnalysisService {
    async fn request_follow_up(
        &self,
        last_user_message: &str,
        conversation_history: &[String],
    ) -> std::result::Result<String, AnalysisError> {
        self.enter(RecordedCall::FollowUp {
            last_user_message: last_user_message.to_string(),
            history: conversation_history.to_vec(),
        })
        .await;
        let next = self.follow_ups.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(format!("What else about \"{last_user_message}\"?")))
    }

    async fn request_day_analysis(
        &self,
        primary_entry: &str,
        follow_up_responses: &[String],
        past_entries: &[DayEntry],
    ) -> std::result::Result<DayAnalysis, AnalysisError> {
        self.enter(RecordedCall::DayAnalysis {
            primary_entry: primary_entry.to_string(),
            follow_ups: follow_up_responses.to_vec(),
            past_entries: past_entries.len(),
        })
        .await;
        let next = self.analyses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(analysis(60)))
    }

    async fn request_companion_reply(
        &self,
        message: &str,
        session_history: &[ChatMessage],
    ) -> std::result::Result<String, AnalysisError> {
        self.enter(RecordedCall::CompanionReply {
            message: message.to_string(),
            history: session_history.to_vec(),
        })
        .await;
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok("I hear you.".to_string()))
    }
}

#[derive(Default)]
pub struct MockEntryRepository {
    entries: Mutex<Vec<DayEntry>>,
    saves: Mutex<usize>,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
}

impl MockEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<DayEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Vec<DayEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EntryRepository for MockEntryRepository {
    async fn load_entries(&self) -> Result<Vec<DayEntry>> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(DaySyncError::io("disk unreadable"));
        }
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn save_entries(&self, entries: &[DayEntry]) -> Result<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(DaySyncError::io("disk full"));
        }
        *self.entries.lock().unwrap() = entries.to_vec();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockSessionRepository {
    sessions: Mutex<Vec<ChatSession>>,
    saves: Mutex<usize>,
    fail_save: AtomicBool,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<ChatSession>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Vec<ChatSession> {
        self.sessions.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChatSessionRepository for MockSessionRepository {
    async fn load_sessions(&self) -> Result<Vec<ChatSession>> {
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn save_sessions(&self, sessions: &[ChatSession]) -> Result<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(DaySyncError::io("disk full"));
        }
        *self.sessions.lock().unwrap() = sessions.to_vec();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}
