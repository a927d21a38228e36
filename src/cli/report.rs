//! Report CLI commands

use clap::Subcommand;

use crate::display::{format_chart, format_month_summary};
use crate::error::EnvelopeResult;
use crate::insight::{summarize_month, NarrativeInsight};
use crate::reports::{ChartSeries, MonthSummary};
use crate::services::BudgetSession;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Allocated, spent and remaining per envelope
    Summary,

    /// Spending per envelope as a bar chart
    Chart,

    /// A short written summary of the month
    Insight,
}

/// Handle a report command
pub fn handle_report_command(session: &BudgetSession, cmd: ReportCommands) -> EnvelopeResult<()> {
    let month = session.month()?;
    let symbol = session.currency();

    match cmd {
        ReportCommands::Summary => {
            print!("{}", format_month_summary(&MonthSummary::from_month(month), symbol));
        }

        ReportCommands::Chart => {
            let series = ChartSeries::from_month(month);
            print!("{}", format_chart(&series, &month.period_label(), symbol));
        }

        ReportCommands::Insight => {
            let generator = NarrativeInsight::with_currency(symbol);
            println!("{}", summarize_month(&generator, month));
        }
    }

    Ok(())
}
