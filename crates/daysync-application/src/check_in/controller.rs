//! Check-in controller.
//!
//! Drives one guided reflection from the opening question to a stored
//! `DayEntry`. All conversation state sits behind one tokio mutex that is
//! released while the analysis service is awaited; a generation counter lets
//! a response that arrives after `abandon` be recognised and dropped.

use super::outcome::{CheckInOutcome, CheckInRejection};
use super::state::{APOLOGY_MESSAGE, CheckInPhase, CheckInView, MAX_FOLLOW_UPS, OPENING_MESSAGE};
use crate::turn::{TurnGate, TurnPermit};
use daysync_core::analysis::AnalysisService;
use daysync_core::entry::{DayEntry, EntryRepository};
use daysync_core::session::ChatMessage;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

struct Conversation {
    messages: Vec<ChatMessage>,
    phase: CheckInPhase,
    gate: Arc<TurnGate>,
    generation: u64,
    last_error: Option<String>,
    entry: Option<DayEntry>,
    store_warning: Option<String>,
}

impl Conversation {
    fn new(generation: u64) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(OPENING_MESSAGE)],
            phase: CheckInPhase::Opening,
            gate: TurnGate::new(),
            generation,
            last_error: None,
            entry: None,
            store_warning: None,
        }
    }

    fn abandoned(generation: u64) -> Self {
        Self {
            messages: Vec::new(),
            phase: CheckInPhase::Abandoned,
            ..Self::new(generation)
        }
    }

    fn closed_reason(&self) -> Option<CheckInRejection> {
        match self.phase {
            CheckInPhase::Complete | CheckInPhase::Abandoned => Some(CheckInRejection::Closed),
            CheckInPhase::Finalizing => Some(CheckInRejection::Finalizing),
            CheckInPhase::Opening | CheckInPhase::Gathering { .. } => None,
        }
    }

    fn can_finalize(&self) -> bool {
        matches!(self.phase, CheckInPhase::Gathering { follow_ups, .. } if follow_ups >= 1)
            && !self.gate.is_busy()
    }

    /// First user message and every later one, in order.
    fn split_user_messages(&self) -> (String, Vec<String>) {
        let mut user_texts = self
            .messages
            .iter()
            .filter(|m| m.is_user())
            .map(|m| m.content.clone());
        let primary = user_texts.next().unwrap_or_default();
        (primary, user_texts.collect())
    }

    fn view(&self) -> CheckInView {
        CheckInView {
            messages: self.messages.clone(),
            phase: self.phase,
            follow_ups_asked: self.phase.follow_ups(),
            awaiting: self.gate.is_busy(),
            can_finalize: self.can_finalize(),
            last_error: self.last_error.clone(),
            entry: self.entry.clone(),
            store_warning: self.store_warning.clone(),
        }
    }
}

/// Turn-budgeted check-in state machine.
///
/// At most one analysis call is outstanding at a time; input arriving while
/// one is in flight is rejected without touching the conversation.
pub struct CheckInController {
    entries: Arc<dyn EntryRepository>,
    analysis: Arc<dyn AnalysisService>,
    state: Mutex<Conversation>,
}

impl CheckInController {
    pub fn new(entries: Arc<dyn EntryRepository>, analysis: Arc<dyn AnalysisService>) -> Self {
        Self {
            entries,
            analysis,
            state: Mutex::new(Conversation::new(0)),
        }
    }

    pub async fn view(&self) -> CheckInView {
        self.state.lock().await.view()
    }

    pub async fn phase(&self) -> CheckInPhase {
        self.state.lock().await.phase
    }

    /// Submits one user message.
    ///
    /// Asks for a follow-up question while fewer than two have been asked;
    /// after that the message triggers finalization.
    pub async fn submit(&self, text: &str) -> CheckInOutcome {
        let text = text.trim();
        if text.is_empty() {
            return CheckInOutcome::Rejected(CheckInRejection::EmptyInput);
        }

        let mut conversation = self.state.lock().await;
        if let Some(reason) = conversation.closed_reason() {
            return CheckInOutcome::Rejected(reason);
        }
        let Some(permit) = conversation.gate.try_begin() else {
            tracing::debug!("[CheckInController] Input rejected: call in flight");
            return CheckInOutcome::Rejected(CheckInRejection::Busy);
        };

        conversation.messages.push(ChatMessage::user(text));
        let asked = conversation.phase.follow_ups();
        if asked >= MAX_FOLLOW_UPS {
            return self.finalize(conversation, permit).await;
        }

        let history: Vec<String> = conversation
            .messages
            .iter()
            .map(|m| m.content.clone())
            .collect();
        let generation = conversation.generation;
        drop(conversation);

        tracing::debug!(
            "[CheckInController] Requesting follow-up {} of {}",
            asked + 1,
            MAX_FOLLOW_UPS
        );
        let result = self.analysis.request_follow_up(text, &history).await;

        let mut conversation = self.state.lock().await;
        if conversation.generation != generation {
            tracing::debug!("[CheckInController] Dropping follow-up for abandoned check-in");
            return CheckInOutcome::Discarded;
        }

        let outcome = match result {
            Ok(question) => {
                conversation
                    .messages
                    .push(ChatMessage::assistant(question.clone()));
                conversation.phase = CheckInPhase::Gathering {
                    follow_ups: asked + 1,
                    errored: false,
                };
                conversation.last_error = None;
                CheckInOutcome::FollowUp { question }
            }
            Err(error) => {
                tracing::warn!("[CheckInController] Follow-up request failed: {}", error);
                conversation
                    .messages
                    .push(ChatMessage::assistant(APOLOGY_MESSAGE));
                conversation.phase = CheckInPhase::Gathering {
                    follow_ups: asked,
                    errored: true,
                };
                conversation.last_error = Some(error.to_string());
                CheckInOutcome::Recovered { error }
            }
        };
        drop(permit);
        outcome
    }

    /// Ends the conversation early and analyses what has been said.
    ///
    /// Allowed once at least one follow-up question has been asked.
    pub async fn finish(&self) -> CheckInOutcome {
        let conversation = self.state.lock().await;
        if let Some(reason) = conversation.closed_reason() {
            return CheckInOutcome::Rejected(reason);
        }
        if conversation.gate.is_busy() {
            return CheckInOutcome::Rejected(CheckInRejection::Busy);
        }
        if conversation.phase.follow_ups() < 1 {
            return CheckInOutcome::Rejected(CheckInRejection::NotReady);
        }
        let Some(permit) = conversation.gate.try_begin() else {
            return CheckInOutcome::Rejected(CheckInRejection::Busy);
        };
        self.finalize(conversation, permit).await
    }

    /// Discards the conversation. Nothing is written to the entry store.
    ///
    /// Returns `false` when the conversation had already completed or been
    /// abandoned. An in-flight call is not waited for; its response is
    /// dropped when it arrives.
    pub async fn abandon(&self) -> bool {
        let mut conversation = self.state.lock().await;
        if conversation.phase.is_terminal() {
            return false;
        }
        let generation = conversation.generation.wrapping_add(1);
        *conversation = Conversation::abandoned(generation);
        tracing::info!("[CheckInController] Check-in abandoned");
        true
    }

    /// Starts a fresh conversation, discarding the current one.
    pub async fn restart(&self) {
        let mut conversation = self.state.lock().await;
        let generation = conversation.generation.wrapping_add(1);
        *conversation = Conversation::new(generation);
    }

    async fn finalize(
        &self,
        mut conversation: MutexGuard<'_, Conversation>,
        permit: TurnPermit,
    ) -> CheckInOutcome {
        let resume_phase = conversation.phase;
        conversation.phase = CheckInPhase::Finalizing;
        conversation.last_error = None;
        let (primary, follow_ups) = conversation.split_user_messages();
        let generation = conversation.generation;
        drop(conversation);

        let (past_entries, load_error) = match self.entries.load_entries().await {
            Ok(entries) => (entries, None),
            Err(e) => {
                tracing::warn!("[CheckInController] Could not load past entries: {}", e);
                (Vec::new(), Some(e))
            }
        };

        tracing::debug!(
            "[CheckInController] Finalizing with {} follow-ups and {} past entries",
            follow_ups.len(),
            past_entries.len()
        );
        let result = self
            .analysis
            .request_day_analysis(&primary, &follow_ups, &past_entries)
            .await;

        let mut conversation = self.state.lock().await;
        if conversation.generation != generation {
            tracing::debug!("[CheckInController] Dropping analysis for abandoned check-in");
            return CheckInOutcome::Discarded;
        }

        let analysis = match result {
            Ok(analysis) => analysis,
            Err(error) => {
                tracing::error!("[CheckInController] Day analysis failed: {}", error);
                conversation.phase = resume_phase;
                conversation.last_error = Some(error.to_string());
                return CheckInOutcome::FinalizeFailed { error };
            }
        };

        let entry = DayEntry::new(primary, follow_ups, analysis);
        conversation.phase = CheckInPhase::Complete;
        conversation.entry = Some(entry.clone());
        drop(conversation);

        let store_warning = match load_error {
            // Saving now would overwrite the history that could not be read.
            Some(e) => Some(format!(
                "Existing entries could not be loaded, so today's entry was not saved: {e}"
            )),
            None => {
                let mut all = Vec::with_capacity(past_entries.len() + 1);
                all.push(entry.clone());
                all.extend(past_entries);
                match self.entries.save_entries(&all).await {
                    Ok(()) => None,
                    Err(e) => Some(format!("Today's entry could not be saved: {e}")),
                }
            }
        };

        match &store_warning {
            Some(warning) => {
                tracing::warn!("[CheckInController] {}", warning);
                let mut conversation = self.state.lock().await;
                if conversation.generation == generation {
                    conversation.store_warning = Some(warning.clone());
                }
            }
            None => tracing::info!(
                "[CheckInController] Stored entry {} (score {})",
                entry.id,
                entry.happiness_score()
            ),
        }

        drop(permit);
        CheckInOutcome::Completed {
            entry,
            store_warning,
        }
    }
}
