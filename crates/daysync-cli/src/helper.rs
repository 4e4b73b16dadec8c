use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// A slash command offered at the prompt.
#[derive(Debug, Clone, Copy)]
pub struct SlashCommand {
    pub name: &'static str,
    /// Argument placeholder shown as a hint, e.g. `<id>`.
    pub usage: Option<&'static str>,
}

impl SlashCommand {
    pub const fn bare(name: &'static str) -> Self {
        Self { name, usage: None }
    }

    pub const fn with_usage(name: &'static str, usage: &'static str) -> Self {
        Self {
            name,
            usage: Some(usage),
        }
    }
}

/// Completes, highlights and hints the slash commands of one REPL.
#[derive(Clone)]
pub struct CliHelper {
    commands: &'static [SlashCommand],
}

impl CliHelper {
    pub fn new(commands: &'static [SlashCommand]) -> Self {
        Self { commands }
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a SlashCommand> + 'a {
        self.commands
            .iter()
            .filter(move |cmd| cmd.name.starts_with(prefix))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        if !typed.starts_with('/') || typed.contains(' ') {
            return Ok((0, Vec::new()));
        }

        let candidates = self
            .matching(typed)
            .map(|cmd| Pair {
                display: cmd.name.to_string(),
                replacement: match cmd.usage {
                    Some(_) => format!("{} ", cmd.name),
                    None => cmd.name.to_string(),
                },
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_once(' ') {
            Some((command, rest)) if command.starts_with('/') => {
                Owned(format!("{} {}", command.bright_cyan(), rest))
            }
            None if line.starts_with('/') => Owned(line.bright_cyan().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.starts_with('/')
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() || !line.starts_with('/') {
            return None;
        }

        // "/open " -> "<id>"
        if let Some(command) = line.strip_suffix(' ') {
            return self
                .commands
                .iter()
                .find(|cmd| cmd.name == command)
                .and_then(|cmd| cmd.usage)
                .map(str::to_string);
        }
        if line.contains(' ') {
            return None;
        }

        let mut matches = self.matching(line);
        match (matches.next(), matches.next()) {
            (Some(only), None) if only.name.len() > line.len() => {
                Some(only.name[line.len()..].to_string())
            }
            _ => None,
        }
    }
}

impl Validator for CliHelper {}
