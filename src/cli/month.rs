//! Month CLI commands
//!
//! Show, set up, finalize/unlock, copy forward and select months.

use clap::Subcommand;

use crate::display::{format_envelope_table, format_month_header, format_year_overview};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::ledger::SetupEntry;
use crate::models::{Money, MONTHS_PER_YEAR};
use crate::reports::YearOverview;
use crate::services::{BudgetSession, Confirm, MonthService};

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// Show the selected month and its envelopes
    Show,

    /// Set up the selected month's envelopes
    Setup {
        /// Envelope as NAME=AMOUNT (repeatable), e.g. -e Groceries=400
        #[arg(short, long = "envelope", value_name = "NAME=AMOUNT", required = true)]
        envelopes: Vec<String>,
        /// Note for the month, e.g. where the money comes from
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Mark the selected month completed
    Finalize,

    /// Reopen a completed month
    Unlock,

    /// Flip the selected month between active and completed
    Toggle,

    /// Copy this month's plan into the next month
    #[command(name = "copy-next")]
    CopyNext,

    /// Remember a month (and, with --year, a year) as the one to work on
    Select {
        /// Month number (1-12)
        #[arg(value_name = "MONTH", value_parser = clap::value_parser!(u32).range(1..=12))]
        number: u32,
    },

    /// Overview of every month of the selected year
    Overview,
}

/// Handle a month command
pub fn handle_month_command(
    session: &mut BudgetSession,
    confirm: &dyn Confirm,
    cmd: MonthCommands,
) -> EnvelopeResult<()> {
    match cmd {
        MonthCommands::Show => {
            let month = session.month()?;
            println!("{}", format_month_header(month, session.currency()));
            println!();
            println!("{}", format_envelope_table(month, session.currency()));
        }

        MonthCommands::Setup { envelopes, note } => {
            let mut entries = Vec::with_capacity(envelopes.len());
            for spec in &envelopes {
                let entry = parse_setup_entry(spec)?;
                if entry.is_valid() {
                    entries.push(entry);
                } else {
                    println!("Skipping '{}': needs a name and a positive amount", spec);
                }
            }

            let month = MonthService::new(session).setup(&entries, note.as_deref(), confirm)?;
            println!(
                "Set up {} with {} envelope(s), budget {}",
                month.period_label(),
                month.categories.len(),
                month.total_budget.format_with_symbol(session.currency())
            );
        }

        MonthCommands::Finalize => {
            let month = MonthService::new(session).finalize()?;
            println!("{} finalized.", month.period_label());
            println!("Run 'envelope report summary' to review it.");
        }

        MonthCommands::Unlock => {
            let month = MonthService::new(session).unlock()?;
            println!("{} unlocked.", month.period_label());
        }

        MonthCommands::Toggle => {
            let month = MonthService::new(session).toggle_completed()?;
            println!("{} is now {}.", month.period_label(), month.status);
        }

        MonthCommands::CopyNext => {
            let source = session.month()?.period_label();
            let next = MonthService::new(session).copy_to_next(confirm)?;
            println!(
                "Copied {} envelope(s) from {} to {}",
                next.categories.len(),
                source,
                next.period_label()
            );
        }

        MonthCommands::Select { number } => {
            session.select(None, Some(month_index(number)?))?;
            let month = session.month()?;
            println!("Selected {} ({})", month.period_label(), month.status);
        }

        MonthCommands::Overview => {
            let overview = YearOverview::from_year(session.year());
            println!("{}", format_year_overview(&overview, session.currency()));
        }
    }

    Ok(())
}

/// Parse `NAME=AMOUNT`; an unparsable amount reads as zero and setup drops it
pub fn parse_setup_entry(spec: &str) -> EnvelopeResult<SetupEntry> {
    let (name, amount) = spec.rsplit_once('=').ok_or_else(|| {
        EnvelopeError::Validation(format!(
            "Invalid envelope '{}'. Use NAME=AMOUNT, e.g. Groceries=400",
            spec
        ))
    })?;
    let amount = Money::parse_or_zero(amount);
    Ok(SetupEntry::new(name.trim(), amount))
}

/// Convert a 1-based month number from the command line
pub fn month_index(month: u32) -> EnvelopeResult<usize> {
    let index = (month as usize).wrapping_sub(1);
    if index < MONTHS_PER_YEAR {
        Ok(index)
    } else {
        Err(EnvelopeError::Validation(format!(
            "Month must be between 1 and {}, got {}",
            MONTHS_PER_YEAR, month
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setup_entry() {
        let entry = parse_setup_entry("Groceries=400").unwrap();
        assert_eq!(entry.name, "Groceries");
        assert_eq!(entry.amount, Money::from_dollars(400));

        let entry = parse_setup_entry(" Date night = 62.50").unwrap();
        assert_eq!(entry.name, "Date night");
        assert_eq!(entry.amount, Money::from_cents(6250));
    }

    #[test]
    fn test_parse_setup_entry_bad_amount_is_dropped() {
        assert!(!parse_setup_entry("Fun=abc").unwrap().is_valid());
        assert!(!parse_setup_entry("Fun=-5").unwrap().is_valid());
        assert!(!parse_setup_entry("Fun=--5").unwrap().is_valid());
        assert!(!parse_setup_entry("Fun=99999999999999").unwrap().is_valid());
        assert!(parse_setup_entry("Fun").unwrap_err().is_validation());
    }

    #[test]
    fn test_month_index() {
        assert_eq!(month_index(1).unwrap(), 0);
        assert_eq!(month_index(12).unwrap(), 11);
        assert!(month_index(0).is_err());
        assert!(month_index(13).is_err());
    }
}
