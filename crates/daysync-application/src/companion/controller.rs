//! Companion controller.
//!
//! Owns the in-memory session list, mirrors every change to the session
//! store and enforces one outstanding reply per session.

use super::outcome::{CompanionOutcome, CompanionRejection};
use super::selection::SessionSelection;
use crate::turn::TurnGate;
use daysync_core::Result;
use daysync_core::analysis::AnalysisService;
use daysync_core::session::{ChatMessage, ChatSession, ChatSessionRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const DEFAULT_SESSION_TITLE: &str = "First Conversation";
pub const DEFAULT_SESSION_OPENING: &str =
    "I am Friend&Help. I am here to listen. How are things on your end?";
pub const NEW_SESSION_TITLE: &str = "New Session";
pub const NEW_SESSION_OPENING: &str = "Starting a fresh reflection. What's on your mind?";

/// Sessions with fewer messages than this are renamed after the next user
/// message.
const RETITLE_BELOW_MESSAGES: usize = 3;

/// One row of the archive view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub updated_at: i64,
    pub message_count: usize,
}

impl From<&ChatSession> for SessionSummary {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            updated_at: session.updated_at,
            message_count: session.message_count(),
        }
    }
}

#[derive(Default)]
struct SessionList {
    /// Newest first, as stored.
    sessions: Vec<ChatSession>,
    gates: HashMap<String, Arc<TurnGate>>,
}

impl SessionList {
    fn get_mut(&mut self, session_id: &str) -> Option<&mut ChatSession> {
        self.sessions.iter_mut().find(|s| s.id == session_id)
    }

    fn contains(&self, session_id: &str) -> bool {
        self.sessions.iter().any(|s| s.id == session_id)
    }

    fn gate(&mut self, session_id: &str) -> Arc<TurnGate> {
        self.gates
            .entry(session_id.to_string())
            .or_insert_with(TurnGate::new)
            .clone()
    }

    /// First session with the highest `updated_at`.
    fn most_recent(&self) -> Option<&ChatSession> {
        self.sessions
            .iter()
            .fold(None, |best: Option<&ChatSession>, s| match best {
                Some(b) if b.updated_at >= s.updated_at => Some(b),
                _ => Some(s),
            })
    }
}

/// Manages independent, resumable companion chat sessions.
pub struct CompanionController {
    repository: Arc<dyn ChatSessionRepository>,
    analysis: Arc<dyn AnalysisService>,
    selection: SessionSelection,
    state: Mutex<SessionList>,
    /// Serialises store writes so the last write carries the newest list.
    persist_lock: Mutex<()>,
}

impl CompanionController {
    pub fn new(
        repository: Arc<dyn ChatSessionRepository>,
        analysis: Arc<dyn AnalysisService>,
        selection: SessionSelection,
    ) -> Self {
        Self {
            repository,
            analysis,
            selection,
            state: Mutex::new(SessionList::default()),
            persist_lock: Mutex::new(()),
        }
    }

    /// Loads the stored sessions.
    ///
    /// An empty store gets one default session, which is saved and selected.
    /// Otherwise the current selection is kept if it still exists, and the
    /// first stored session is selected if not. Returns a store warning when
    /// the default session could not be saved.
    pub async fn bootstrap(&self) -> Result<Option<String>> {
        let sessions = self.repository.load_sessions().await?;
        let selected = self.selection.get().await;

        let mut state = self.state.lock().await;
        state.sessions = sessions;

        if state.sessions.is_empty() {
            let session = ChatSession::with_opening(DEFAULT_SESSION_TITLE, DEFAULT_SESSION_OPENING);
            tracing::info!(
                "[CompanionController] Created default session {}",
                session.id
            );
            self.selection.set(Some(session.id.clone())).await;
            state.sessions.push(session);
            drop(state);
            return Ok(self.persist().await);
        }

        let keep = selected.filter(|id| state.contains(id));
        let active = keep.or_else(|| state.sessions.first().map(|s| s.id.clone()));
        tracing::debug!(
            "[CompanionController] Loaded {} sessions, active: {:?}",
            state.sessions.len(),
            active
        );
        self.selection.set(active).await;
        Ok(None)
    }

    /// Starts a new session at the top of the list and selects it.
    pub async fn create(&self) -> (ChatSession, Option<String>) {
        let session = ChatSession::with_opening(NEW_SESSION_TITLE, NEW_SESSION_OPENING);
        {
            let mut state = self.state.lock().await;
            state.sessions.insert(0, session.clone());
            self.selection.set(Some(session.id.clone())).await;
        }
        tracing::debug!("[CompanionController] Created session {}", session.id);
        let store_warning = self.persist().await;
        (session, store_warning)
    }

    /// Changes the active session. Does not touch the store.
    ///
    /// `None` shows the archive view. An unknown id falls back to the most
    /// recently updated session. Returns the id that ended up active.
    pub async fn select(&self, session_id: Option<&str>) -> Option<String> {
        let state = self.state.lock().await;
        let active = match session_id {
            None => None,
            Some(id) if state.contains(id) => Some(id.to_string()),
            Some(id) => {
                let fallback = state.most_recent().map(|s| s.id.clone());
                tracing::debug!(
                    "[CompanionController] Session {} not found, falling back to {:?}",
                    id,
                    fallback
                );
                fallback
            }
        };
        self.selection.set(active.clone()).await;
        active
    }

    pub async fn active_id(&self) -> Option<String> {
        self.selection.get().await
    }

    pub async fn active_session(&self) -> Option<ChatSession> {
        let active = self.selection.get().await?;
        self.session(&active).await
    }

    pub async fn session(&self, session_id: &str) -> Option<ChatSession> {
        let state = self.state.lock().await;
        state.sessions.iter().find(|s| s.id == session_id).cloned()
    }

    /// All sessions, newest first.
    pub async fn sessions(&self) -> Vec<ChatSession> {
        self.state.lock().await.sessions.clone()
    }

    pub async fn archive(&self) -> Vec<SessionSummary> {
        let state = self.state.lock().await;
        state.sessions.iter().map(SessionSummary::from).collect()
    }

    /// Whether `session_id` is waiting for a reply (the typing indicator).
    pub async fn is_awaiting(&self, session_id: &str) -> bool {
        let state = self.state.lock().await;
        state
            .gates
            .get(session_id)
            .is_some_and(|gate| gate.is_busy())
    }

    /// Sends `text` to the active session.
    pub async fn send(&self, text: &str) -> CompanionOutcome {
        match self.selection.get().await {
            Some(session_id) => self.send_to(&session_id, text).await,
            None => CompanionOutcome::Rejected(CompanionRejection::NoActiveSession),
        }
    }

    /// Sends `text` to one session and waits for the reply.
    ///
    /// The user message is appended and saved before the service is called
    /// and stays even if the call fails.
    pub async fn send_to(&self, session_id: &str, text: &str) -> CompanionOutcome {
        let text = text.trim();
        if text.is_empty() {
            return CompanionOutcome::Rejected(CompanionRejection::EmptyInput);
        }

        let mut state = self.state.lock().await;
        if !state.contains(session_id) {
            return CompanionOutcome::Rejected(CompanionRejection::UnknownSession(
                session_id.to_string(),
            ));
        }
        let gate = state.gate(session_id);
        let Some(permit) = gate.try_begin() else {
            tracing::debug!(
                "[CompanionController] Session {} is awaiting a reply",
                session_id
            );
            return CompanionOutcome::Rejected(CompanionRejection::Busy);
        };

        let Some(session) = state.get_mut(session_id) else {
            return CompanionOutcome::Rejected(CompanionRejection::UnknownSession(
                session_id.to_string(),
            ));
        };
        let history = session.messages.clone();
        session.push(ChatMessage::user(text));
        drop(state);

        let first_warning = self.persist().await;
        let result = self.analysis.request_companion_reply(text, &history).await;

        let outcome = match result {
            Ok(reply_text) => {
                let reply = ChatMessage::assistant(reply_text);
                let mut retitled = None;
                {
                    let mut state = self.state.lock().await;
                    if let Some(session) = state.get_mut(session_id) {
                        session.push(reply.clone());
                        if history.len() < RETITLE_BELOW_MESSAGES {
                            session.title = ChatSession::snippet_title(text);
                            retitled = Some(session.title.clone());
                        }
                    }
                }
                let store_warning = self.persist().await.or(first_warning);
                CompanionOutcome::Replied {
                    session_id: session_id.to_string(),
                    reply,
                    retitled,
                    store_warning,
                }
            }
            Err(error) => {
                tracing::error!(
                    "[CompanionController] Reply for session {} failed: {}",
                    session_id,
                    error
                );
                CompanionOutcome::Failed {
                    session_id: session_id.to_string(),
                    error,
                    store_warning: first_warning,
                }
            }
        };
        drop(permit);
        outcome
    }

    async fn persist(&self) -> Option<String> {
        let _write = self.persist_lock.lock().await;
        let snapshot = self.state.lock().await.sessions.clone();
        match self.repository.save_sessions(&snapshot).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("[CompanionController] Failed to save sessions: {}", e);
                Some(format!("Sessions could not be saved: {e}"))
            }
        }
    }
}
