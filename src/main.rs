use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use envelope_planner::cli::{
    handle_envelope_command, handle_expense, handle_export_command, handle_month_command,
    handle_report_command, handle_sync_command, handle_top_up, handle_transfer, month_index,
    EnvelopeCommands, ExpenseArgs, ExportCommands, MonthCommands, ReportCommands, SyncCommands,
    TopUpArgs, TransferArgs,
};
use envelope_planner::config::paths::EnvelopePaths;
use envelope_planner::error::{EnvelopeError, EnvelopeResult};
use envelope_planner::services::{AlwaysConfirm, BudgetSession, Confirm, StdinConfirm};

#[derive(Parser)]
#[command(
    name = "envelope",
    version,
    about = "Monthly envelope budgeting from the command line",
    long_about = "Plan each month by splitting the budget into envelopes, record \
                  expenses against them, move money between envelopes and review \
                  where it went. Data stays on this machine unless you sign in to sync."
)]
struct Cli {
    /// Budget year to work on (defaults to the selected year)
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Month to work on, 1-12 (defaults to the selected month)
    #[arg(long, global = true)]
    month: Option<u32>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Month setup, lifecycle and selection
    #[command(subcommand)]
    Month(MonthCommands),

    /// Envelope management
    #[command(subcommand, alias = "env")]
    Envelope(EnvelopeCommands),

    /// Record an expense against an envelope
    Expense(ExpenseArgs),

    /// Add money to an envelope and the month budget
    #[command(name = "top-up")]
    TopUp(TopUpArgs),

    /// Move allocation from one envelope to another
    Transfer(TransferArgs),

    /// Month reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Cloud sync
    #[command(subcommand)]
    Sync(SyncCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("envelope - monthly envelope budgeting");
        println!();
        println!("Run 'envelope --help' for usage information.");
        println!("Run 'envelope month setup -e Groceries=400 -e Rent=1200' to get started.");
        return Ok(());
    };

    let paths = EnvelopePaths::new()?;
    let mut session = BudgetSession::open(paths)?;
    let month = cli.month.map(month_index).transpose()?;
    session.focus(cli.year, month)?;

    let confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(StdinConfirm)
    };

    let result = run(&mut session, confirm.as_ref(), command);
    session.flush_sync();

    match result {
        Err(EnvelopeError::Cancelled(_)) => {
            println!("Aborted.");
            Ok(())
        }
        other => Ok(other?),
    }
}

fn run(session: &mut BudgetSession, confirm: &dyn Confirm, command: Commands) -> EnvelopeResult<()> {
    match command {
        Commands::Month(cmd) => handle_month_command(session, confirm, cmd),
        Commands::Envelope(cmd) => handle_envelope_command(session, confirm, cmd),
        Commands::Expense(args) => handle_expense(session, args),
        Commands::TopUp(args) => handle_top_up(session, args),
        Commands::Transfer(args) => handle_transfer(session, args),
        Commands::Report(cmd) => handle_report_command(session, cmd),
        Commands::Sync(cmd) => handle_sync_command(session, cmd),
        Commands::Export(cmd) => handle_export_command(session, cmd),
        Commands::Audit { count } => {
            let entries = session.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
            Ok(())
        }
        Commands::Config => {
            let paths = session.paths();
            let settings = session.settings();
            println!("Envelope Planner Configuration");
            println!("==============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Selected month:  {}", session.month()?.period_label());
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Cloud:           {}", session.sync_session());
            println!("  Cloud directory: {}", settings.cloud_dir(paths).display());
            Ok(())
        }
    }
}
