//! Cloud sync CLI commands

use clap::Subcommand;

use crate::error::EnvelopeResult;
use crate::services::{BudgetSession, PullOutcome};

/// Sync subcommands
#[derive(Subcommand)]
pub enum SyncCommands {
    /// Sign in and sync the selected year
    Login {
        /// Cloud identifier (e.g. an email address)
        identifier: String,
    },

    /// Push pending changes and sign out
    Logout,

    /// Replace local data with the cloud copy
    Pull,

    /// Upload the selected year now
    Push,

    /// Show who is signed in and where the cloud lives
    Status,
}

/// Handle a sync command
pub fn handle_sync_command(session: &mut BudgetSession, cmd: SyncCommands) -> EnvelopeResult<()> {
    match cmd {
        SyncCommands::Login { identifier } => {
            let outcome = session.login(&identifier)?;
            println!("Signed in as {}", identifier.trim());
            describe_pull(session, outcome);
        }

        SyncCommands::Logout => {
            session.logout()?;
            println!("Signed out. Changes stay on this machine only.");
        }

        SyncCommands::Pull => {
            let outcome = session.pull()?;
            describe_pull(session, outcome);
        }

        SyncCommands::Push => {
            session.push()?;
            println!("Uploaded {}.", session.year().year);
        }

        SyncCommands::Status => {
            println!("Session: {}", session.sync_session());
            println!(
                "Cloud directory: {}",
                session.settings().cloud_dir(session.paths()).display()
            );
            println!("Push delay: {} ms", session.settings().sync_debounce_ms);
        }
    }

    Ok(())
}

fn describe_pull(session: &BudgetSession, outcome: PullOutcome) {
    let year = session.year().year;
    match outcome {
        PullOutcome::Replaced => println!("Loaded {} from the cloud.", year),
        PullOutcome::UpToDate => println!("{} is already up to date.", year),
        PullOutcome::NoRecord => println!("No cloud copy of {} yet; local data was uploaded.", year),
        PullOutcome::SignedOut => println!("Not signed in. Run 'envelope sync login <id>' first."),
    }
}
