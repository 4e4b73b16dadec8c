use super::{Input, editor, read_input};
use crate::helper::SlashCommand;
use crate::render;
use anyhow::Result;
use daysync_application::check_in::APOLOGY_MESSAGE;
use daysync_application::{AppContext, CheckInOutcome, CheckInRejection};

const COMMANDS: &[SlashCommand] = &[SlashCommand::bare("/finish"), SlashCommand::bare("/quit")];

/// Runs one guided check-in to completion or until the user quits.
pub async fn run_check_in(context: &AppContext, again: bool) -> Result<()> {
    let status = context.today().await?;
    if let Some(entry) = status.entry.as_ref().filter(|_| !again) {
        render::hint(&format!(
            "You already synced today (happiness {}). Use --again to add another entry.",
            entry.happiness_score()
        ));
        return Ok(());
    }

    let controller = context.check_in();
    let mut rl = editor(COMMANDS)?;

    for message in controller.view().await.messages {
        render::message(&message);
    }
    render::hint("Type /finish to wrap up early, /quit to discard.");

    loop {
        let line = match read_input(&mut rl)? {
            Input::Line(line) => line,
            Input::Quit => {
                controller.abandon().await;
                render::hint("Check-in discarded.");
                return Ok(());
            }
        };

        let outcome = match line.as_str() {
            "" => continue,
            "/quit" => {
                controller.abandon().await;
                render::hint("Check-in discarded.");
                return Ok(());
            }
            "/finish" => {
                render::hint("Analysing your day...");
                controller.finish().await
            }
            _ => controller.submit(&line).await,
        };

        match outcome {
            CheckInOutcome::FollowUp { question } => {
                render::assistant(&question);
                if controller.view().await.can_finalize {
                    render::hint("(/finish when you are ready)");
                }
            }
            CheckInOutcome::Recovered { error } => {
                tracing::warn!("[CheckIn] Follow-up failed: {}", error);
                render::assistant(APOLOGY_MESSAGE);
                if controller.view().await.can_finalize {
                    render::hint("(/finish to save what you have)");
                } else {
                    render::hint("(keep going, or /quit)");
                }
            }
            CheckInOutcome::Completed {
                entry,
                store_warning,
            } => {
                render::entry(&entry);
                if let Some(warning) = store_warning {
                    render::warning(&warning);
                }
                return Ok(());
            }
            CheckInOutcome::FinalizeFailed { error } => {
                render::error(&format!("Could not analyse your day: {error}"));
                render::hint("Your answers are kept. Type /finish to try again.");
            }
            CheckInOutcome::Rejected(rejection) => match rejection {
                CheckInRejection::EmptyInput => {}
                CheckInRejection::NotReady => {
                    render::hint("Tell me about your day first.");
                }
                CheckInRejection::Busy | CheckInRejection::Finalizing => {
                    render::hint("Still working on the last message.");
                }
                CheckInRejection::Closed => return Ok(()),
            },
            CheckInOutcome::Discarded => return Ok(()),
        }
    }
}
