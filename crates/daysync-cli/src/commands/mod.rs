//! One handler per subcommand.

mod chat;
mod check_in;
mod report;

pub use chat::run_chat;
pub use check_in::run_check_in;
pub use report::{run_advice, run_insights, run_sessions, run_today, run_wipe};

use crate::helper::{CliHelper, SlashCommand};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

/// A line read from the prompt.
pub(crate) enum Input {
    Line(String),
    /// Ctrl-C or Ctrl-D
    Quit,
}

pub(crate) fn editor(
    commands: &'static [SlashCommand],
) -> anyhow::Result<Editor<CliHelper, DefaultHistory>> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(commands)));
    Ok(rl)
}

pub(crate) fn read_input(rl: &mut Editor<CliHelper, DefaultHistory>) -> anyhow::Result<Input> {
    match rl.readline("> ") {
        Ok(line) => {
            let line = line.trim().to_string();
            if !line.is_empty() {
                let _ = rl.add_history_entry(line.as_str());
            }
            Ok(Input::Line(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(Input::Quit),
        Err(err) => Err(err.into()),
    }
}
