//! Envelope CLI commands
//!
//! Envelope management on the selected month, plus the money-moving commands
//! (expense, top-up, transfer) that act on envelopes.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::display::{format_envelope_ledger, format_envelope_table};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::ledger::Direction;
use crate::models::Money;
use crate::services::{BudgetSession, Confirm, EnvelopeService};

/// Envelope subcommands
#[derive(Subcommand)]
pub enum EnvelopeCommands {
    /// List the envelopes of the selected month
    List,

    /// Show one envelope and its transactions
    Show {
        /// Envelope name or ID
        envelope: String,
    },

    /// Add an envelope to the selected month
    Add {
        /// Envelope name
        name: String,
        /// Allocation (e.g. "150" or "150.00")
        #[arg(default_value = "0")]
        amount: String,
    },

    /// Delete an envelope and its transactions
    Delete {
        /// Envelope name or ID
        envelope: String,
    },

    /// Move an envelope up in the display order
    Up {
        /// Envelope name or ID
        envelope: String,
    },

    /// Move an envelope down in the display order
    Down {
        /// Envelope name or ID
        envelope: String,
    },
}

/// Record an expense
#[derive(Args)]
pub struct ExpenseArgs {
    /// Envelope name or ID
    pub envelope: String,
    /// Amount spent (e.g. "42.50")
    #[arg(allow_negative_numbers = true)]
    pub amount: String,
    /// What the money was spent on
    #[arg(short, long)]
    pub description: Option<String>,
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

/// Top up an envelope
#[derive(Args)]
pub struct TopUpArgs {
    /// Envelope name or ID
    pub envelope: String,
    /// Amount to add
    #[arg(allow_negative_numbers = true)]
    pub amount: String,
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

/// Move allocation between envelopes
#[derive(Args)]
pub struct TransferArgs {
    /// Source envelope name or ID
    pub from: String,
    /// Destination envelope name or ID
    pub to: String,
    /// Amount to move
    #[arg(allow_negative_numbers = true)]
    pub amount: String,
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

/// Handle an envelope command
pub fn handle_envelope_command(
    session: &mut BudgetSession,
    confirm: &dyn Confirm,
    cmd: EnvelopeCommands,
) -> EnvelopeResult<()> {
    match cmd {
        EnvelopeCommands::List => {
            println!("{}", format_envelope_table(session.month()?, session.currency()));
        }

        EnvelopeCommands::Show { envelope } => {
            let category = session.find_category(&envelope)?;
            print!("{}", format_envelope_ledger(category, session.currency()));
        }

        EnvelopeCommands::Add { name, amount } => {
            let amount = Money::parse(&amount).map_err(|e| {
                EnvelopeError::Validation(format!("Invalid amount '{}': {}", amount, e))
            })?;
            let category = EnvelopeService::new(session).add(&name, amount)?;
            println!(
                "Added envelope: {} ({})",
                category.name,
                category.allocated_amount.format_with_symbol(session.currency())
            );
        }

        EnvelopeCommands::Delete { envelope } => {
            let category = EnvelopeService::new(session).delete(&envelope, confirm)?;
            println!("Deleted envelope: {}", category.name);
        }

        EnvelopeCommands::Up { envelope } => {
            EnvelopeService::new(session).reorder(&envelope, Direction::Up)?;
            println!("Moved '{}' up", envelope);
        }

        EnvelopeCommands::Down { envelope } => {
            EnvelopeService::new(session).reorder(&envelope, Direction::Down)?;
            println!("Moved '{}' down", envelope);
        }
    }

    Ok(())
}

pub fn handle_expense(session: &mut BudgetSession, args: ExpenseArgs) -> EnvelopeResult<()> {
    let amount = parse_amount(&args.amount)?;
    let date = parse_date(args.date.as_deref())?;
    let description = args.description.unwrap_or_default();

    let txn = EnvelopeService::new(session).record_expense(&args.envelope, amount, &description, date)?;
    let category = session.find_category(&args.envelope)?;
    println!(
        "Recorded {} on {} ({}). Remaining: {}",
        txn.amount.format_with_symbol(session.currency()),
        category.name,
        txn.description,
        category.remaining().format_with_symbol(session.currency())
    );
    Ok(())
}

pub fn handle_top_up(session: &mut BudgetSession, args: TopUpArgs) -> EnvelopeResult<()> {
    let amount = parse_amount(&args.amount)?;
    let date = parse_date(args.date.as_deref())?;

    let category = EnvelopeService::new(session).top_up(&args.envelope, amount, date)?;
    let symbol = session.currency();
    println!(
        "Topped up {} by {}. Allocation: {}, month budget: {}",
        category.name,
        amount.format_with_symbol(symbol),
        category.allocated_amount.format_with_symbol(symbol),
        session.month()?.total_budget.format_with_symbol(symbol)
    );
    Ok(())
}

pub fn handle_transfer(session: &mut BudgetSession, args: TransferArgs) -> EnvelopeResult<()> {
    let amount = parse_amount(&args.amount)?;
    let date = parse_date(args.date.as_deref())?;

    let (from, to) = EnvelopeService::new(session).transfer(&args.from, &args.to, amount, date)?;
    let symbol = session.currency();
    println!(
        "Moved {} from {} to {}",
        amount.format_with_symbol(symbol),
        from.name,
        to.name
    );
    println!(
        "  {}: {}\n  {}: {}",
        from.name,
        from.allocated_amount.format_with_symbol(symbol),
        to.name,
        to.allocated_amount.format_with_symbol(symbol)
    );
    if from.allocated_amount.is_negative() {
        println!("Note: {} is now below zero.", from.name);
    }
    Ok(())
}

/// Parse an amount that must be positive
pub fn parse_amount(input: &str) -> EnvelopeResult<Money> {
    Money::parse_positive(input).ok_or_else(|| {
        EnvelopeError::Validation(format!(
            "Invalid amount '{}'. Use a positive amount like '42.50'",
            input
        ))
    })
}

/// Parse a YYYY-MM-DD date, defaulting to today
pub fn parse_date(input: Option<&str>) -> EnvelopeResult<NaiveDate> {
    match input {
        Some(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
            EnvelopeError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", text))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
