mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use faithcal_core::audit::AuditLog;
use faithcal_core::config::AppConfig;
use faithcal_core::storage::Storage;
use faithcal_core::store::{PersonalEventStore, StoreNotice};
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Parser)]
#[command(name = "faithcal")]
#[command(about = "Browse religious observances and manage your personal calendar events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events in a date range (default: this month and the next)
    Events {
        /// Show events from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Traditions to include for this run (overrides the saved filter)
        #[arg(short, long)]
        tradition: Vec<String>,
    },
    /// Show or change which traditions are displayed
    Traditions {
        /// Traditions to select (replaces the saved filter)
        names: Vec<String>,

        /// Clear the saved filter
        #[arg(long)]
        none: bool,
    },
    /// Add a personal event
    Add {
        /// Event title
        title: Option<String>,

        /// Event date (e.g. "2025-03-20" or "next friday")
        #[arg(short, long)]
        date: Option<String>,

        /// Event description
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a personal event, with a short undo window
    Remove {
        /// Id of the event to remove (shown by `faithcal events`)
        id: String,
    },
    /// Show the deletion audit trail
    Log {
        /// Show only the newest N entries
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show only entries for this event id
        #[arg(long)]
        event: Option<String>,

        /// Clear the audit log
        #[arg(long)]
        clear: bool,

        /// Skip the confirmation prompt for --clear
        #[arg(long)]
        force: bool,
    },
}

/// Shared handles built once per invocation.
pub(crate) struct App {
    pub config: AppConfig,
    pub storage: Storage,
}

impl App {
    fn init() -> Result<Self> {
        let config = AppConfig::load()?;
        let storage = Storage::open(config.data_path());
        Ok(App { config, storage })
    }

    /// Open the personal events store together with its notice channel.
    pub fn open_store(&self) -> (PersonalEventStore, UnboundedReceiver<StoreNotice>) {
        let audit = AuditLog::load(self.storage.clone());
        PersonalEventStore::open(self.storage.clone(), audit, self.config.grace_window())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr and stay quiet unless RUST_LOG raises the level
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;

    let cli = Cli::parse();
    let app = App::init()?;

    match cli.command {
        Commands::Events { from, to, tradition } => {
            commands::events::run(&app, from, to, tradition).await
        }
        Commands::Traditions { names, none } => commands::traditions::run(&app, names, none),
        Commands::Add {
            title,
            date,
            description,
        } => commands::add::run(&app, title, date, description).await,
        Commands::Remove { id } => commands::remove::run(&app, &id).await,
        Commands::Log {
            limit,
            event,
            clear,
            force,
        } => commands::log::run(&app, limit, event, clear, force),
    }
}
