mod commands;
mod helper;
mod render;
mod setup;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use setup::Setup;

/// DaySync: a daily mood journal with an AI companion.
#[derive(Parser)]
#[command(name = "daysync")]
#[command(about = "Daily check-ins, weekly insights and a reflective companion", long_about = None)]
struct Cli {
    /// Store entries and sessions under this directory
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tell DaySync about your day and get it analysed
    CheckIn {
        /// Start a check-in even if today already has an entry
        #[arg(long)]
        again: bool,
    },
    /// Talk with the companion
    Chat {
        /// Open this session (id or unique prefix)
        #[arg(long, conflicts_with = "new")]
        session: Option<String>,
        /// Start a new session
        #[arg(long)]
        new: bool,
    },
    /// List companion sessions, most recent first
    Sessions,
    /// Show the last seven days of mood scores
    Insights,
    /// Show advice from the latest check-in
    Advice,
    /// Show whether today has been synced
    Today,
    /// Delete every entry and chat session
    Wipe {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup::init_tracing();

    let cli = Cli::parse();
    let setup = Setup::new(cli.data_dir, cli.ephemeral)?;
    tracing::debug!("Data directory: {:?}", setup.paths.data_dir());

    match cli.command {
        Commands::CheckIn { again } => {
            let context = setup.online_context().await?;
            commands::run_check_in(&context, again).await
        }
        Commands::Chat { session, new } => {
            let context = setup.online_context().await?;
            commands::run_chat(&context, session, new).await
        }
        Commands::Sessions => commands::run_sessions(&setup.offline_context()).await,
        Commands::Insights => commands::run_insights(&setup.offline_context()).await,
        Commands::Advice => commands::run_advice(&setup.offline_context()).await,
        Commands::Today => commands::run_today(&setup.offline_context()).await,
        Commands::Wipe { yes } => commands::run_wipe(&setup.offline_context(), yes).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["daysync", "insights", "--ephemeral", "--data-dir", "/tmp/d"]);
        assert!(cli.ephemeral);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/d")));
        assert!(matches!(cli.command, Commands::Insights));
    }

    #[test]
    fn test_chat_session_and_new_conflict() {
        let result = Cli::try_parse_from(["daysync", "chat", "--session", "abc", "--new"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_wipe_defaults_to_unconfirmed() {
        let cli = Cli::parse_from(["daysync", "wipe"]);
        assert!(matches!(cli.command, Commands::Wipe { yes: false }));
    }
}
