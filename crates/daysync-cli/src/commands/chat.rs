use super::{Input, editor, read_input};
use crate::helper::SlashCommand;
use crate::render;
use anyhow::Result;
use daysync_application::{AppContext, CompanionController, CompanionOutcome, CompanionRejection};

const COMMANDS: &[SlashCommand] = &[
    SlashCommand::bare("/new"),
    SlashCommand::bare("/archive"),
    SlashCommand::with_usage("/open", "<id>"),
    SlashCommand::bare("/quit"),
];

/// Opens the companion chat.
///
/// `session` may be a full id or a unique prefix as printed by `sessions`.
pub async fn run_chat(context: &AppContext, session: Option<String>, new: bool) -> Result<()> {
    let companion = context.companion();
    if let Some(warning) = companion.bootstrap().await? {
        render::warning(&warning);
    }

    if new {
        create(&companion).await;
    } else if let Some(wanted) = session {
        open(&companion, &wanted).await;
    } else if let Some(active) = companion.active_session().await {
        render::transcript(&active);
    }
    render::hint("Commands: /new, /archive, /open <id>, /quit");

    let mut rl = editor(COMMANDS)?;
    loop {
        let line = match read_input(&mut rl)? {
            Input::Line(line) => line,
            Input::Quit => return Ok(()),
        };

        match line.split_once(' ').map_or((line.as_str(), ""), |(c, a)| (c, a.trim())) {
            ("", _) => continue,
            ("/quit", _) => return Ok(()),
            ("/new", _) => create(&companion).await,
            ("/archive", _) => {
                let active = companion.active_id().await;
                render::session_list(&companion.archive().await, active.as_deref());
            }
            ("/open", "") => render::hint("Usage: /open <id>"),
            ("/open", wanted) => {
                open(&companion, wanted).await;
            }
            _ => send(&companion, &line).await,
        }
    }
}

async fn create(companion: &CompanionController) {
    let (session, warning) = companion.create().await;
    if let Some(warning) = warning {
        render::warning(&warning);
    }
    render::transcript(&session);
}

/// Opens `wanted`; an id that matches nothing falls back to the most
/// recently updated session. Returns the id that ended up active.
async fn open(companion: &CompanionController, wanted: &str) -> Option<String> {
    let resolved = resolve_id(companion, wanted).await;
    if resolved.is_none() {
        render::warning(&format!(
            "No session matches '{wanted}', opening the most recent one"
        ));
    }
    let active = companion
        .select(Some(resolved.as_deref().unwrap_or(wanted)))
        .await;
    if let Some(session) = companion.active_session().await {
        render::transcript(&session);
    }
    active
}

async fn send(companion: &CompanionController, text: &str) {
    match companion.send(text).await {
        CompanionOutcome::Replied {
            reply,
            retitled,
            store_warning,
            ..
        } => {
            render::message(&reply);
            if let Some(title) = retitled {
                render::hint(&format!("(session renamed to \"{title}\")"));
            }
            if let Some(warning) = store_warning {
                render::warning(&warning);
            }
        }
        CompanionOutcome::Failed {
            error,
            store_warning,
            ..
        } => {
            render::error(&format!("No reply: {error}"));
            if let Some(warning) = store_warning {
                render::warning(&warning);
            }
        }
        CompanionOutcome::Rejected(CompanionRejection::NoActiveSession) => {
            render::hint("No session is open. Use /new or /open <id>.");
        }
        CompanionOutcome::Rejected(CompanionRejection::UnknownSession(id)) => {
            render::warning(&format!("Session {id} no longer exists"));
        }
        CompanionOutcome::Rejected(CompanionRejection::Busy) => {
            render::hint("Still waiting for the last reply.");
        }
        CompanionOutcome::Rejected(CompanionRejection::EmptyInput) => {}
    }
}

/// Exact id first, then a unique prefix.
async fn resolve_id(companion: &CompanionController, wanted: &str) -> Option<String> {
    let sessions = companion.sessions().await;
    if let Some(exact) = sessions.iter().find(|s| s.id == wanted) {
        return Some(exact.id.clone());
    }
    let mut matches = sessions.iter().filter(|s| s.id.starts_with(wanted));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only.id.clone()),
        _ => None,
    }
}
