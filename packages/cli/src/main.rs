mod commands;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;

use client::ClientError;
use client::api::ApiClient;
use client::config::ClientConfig;
use client::session::FileSessionStore;

#[derive(Parser)]
#[command(name = "technovaganza", version, about = "Technovaganza 2025 event registration")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a participant account
    Register,
    /// Log in as a participant
    Login,
    /// Drop all stored sessions
    Logout,
    /// Show who is currently logged in
    Whoami,
    /// Show your registrations and fee summary
    Dashboard,
    /// List all events
    Events,
    /// Register yourself for a solo event
    Solo { event_id: String },
    /// Create a team for a team event
    Team { event_id: String },
    /// Generate your participation certificate PDF
    Receipt,
    /// Administrator commands
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Log in as an administrator
    Login,
    /// Manage events
    Event {
        #[command(subcommand)]
        command: AdminEventCommand,
    },
    /// Show registration statistics
    Stats {
        /// Time range: all, today, week or month
        #[arg(long, default_value = "all")]
        range: String,
    },
    /// Download participant lists as CSV
    Export {
        #[command(subcommand)]
        command: AdminExportCommand,
    },
}

#[derive(Subcommand)]
enum AdminEventCommand {
    Create,
    List,
    Delete { event_id: String },
}

#[derive(Subcommand)]
enum AdminExportCommand {
    /// Participants of one event
    Event {
        event_id: String,
        #[arg(long)]
        college: Option<String>,
    },
    /// All participants
    All {
        #[arg(long)]
        college: Option<String>,
    },
    /// All participants from one college
    College { name: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{} {e:#}", style("error:").red().bold());
        if matches!(e.downcast_ref::<ClientError>(), Some(ClientError::Auth)) {
            eprintln!(
                "Your session has expired. Run {} or {} to sign in again.",
                style("technovaganza login").cyan(),
                style("technovaganza admin login").cyan()
            );
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ClientConfig::load().context("Failed to load config")?;
    let session = Arc::new(FileSessionStore::open_default()?);
    let client = Arc::new(ApiClient::new(&config, session)?);

    match cli.command {
        Command::Register => commands::auth::register(&client).await,
        Command::Login => commands::auth::login(&client).await,
        Command::Logout => commands::auth::logout(&client),
        Command::Whoami => commands::auth::whoami(&client),
        Command::Dashboard => commands::dashboard::show(&client).await,
        Command::Events => commands::events::list(&client).await,
        Command::Solo { event_id } => commands::events::register_solo(&client, &event_id).await,
        Command::Team { event_id } => commands::team::create(&client, &event_id).await,
        Command::Receipt => commands::receipt::generate(&client, &config).await,
        Command::Admin { command } => match command {
            AdminCommand::Login => commands::admin::login(&client).await,
            AdminCommand::Event { command } => match command {
                AdminEventCommand::Create => commands::admin::create_event(&client).await,
                AdminEventCommand::List => commands::admin::list_events(&client).await,
                AdminEventCommand::Delete { event_id } => {
                    commands::admin::delete_event(&client, &event_id).await
                }
            },
            AdminCommand::Stats { range } => commands::admin::statistics(&client, &range).await,
            AdminCommand::Export { command } => match command {
                AdminExportCommand::Event { event_id, college } => {
                    commands::admin::export_event(&client, &config, &event_id, college.as_deref())
                        .await
                }
                AdminExportCommand::All { college } => {
                    commands::admin::export_all(&client, &config, college.as_deref()).await
                }
                AdminExportCommand::College { name } => {
                    commands::admin::export_college(&client, &config, &name).await
                }
            },
        },
    }
}
