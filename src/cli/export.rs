//! CLI commands for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::EnvelopeResult;
use crate::export::{export_month_csv, export_year_json};
use crate::services::BudgetSession;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the selected month's transactions to CSV
    Csv {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the selected year to JSON
    Json {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(session: &BudgetSession, cmd: ExportCommands) -> EnvelopeResult<()> {
    match cmd {
        ExportCommands::Csv { output } => {
            let month = session.month()?;
            let rows = export_month_csv(month, open_output(output.as_ref())?)?;
            if let Some(path) = output {
                println!(
                    "Exported {} transaction(s) from {} to {}",
                    rows,
                    month.period_label(),
                    path.display()
                );
            }
        }

        ExportCommands::Json { output } => {
            let mut writer = open_output(output.as_ref())?;
            export_year_json(session.year(), &mut writer)?;
            writer.flush()?;
            if let Some(path) = output {
                println!("Exported {} to {}", session.year().year, path.display());
            }
        }
    }

    Ok(())
}

fn open_output(path: Option<&PathBuf>) -> EnvelopeResult<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    })
}
