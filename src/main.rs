use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roommate_ledger::api;
use roommate_ledger::client::LedgerClient;
use roommate_ledger::config::{ServerConfig, DEFAULT_PORT};
use roommate_ledger::ledger::Ledger;

#[derive(Parser)]
#[command(name = "ledger")]
#[command(about = "Household roommate ledger: chores, bills, and equal bill splitting")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Database file (overrides ROOMMATE_LEDGER_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Check that a server is reachable
    Status,
    /// List chores and bills due soon from a running server
    Upcoming {
        /// Window size in days
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Print the per-roommate tracker summary from a running server
    Summary,
    /// Delete every roommate, chore, and bill
    Clear {
        /// Database file (overrides ROOMMATE_LEDGER_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "roommate_ledger=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: ServerConfig, host: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting roommate ledger on port {}", port);

    let db = config.open_database()?;
    db.migrate()?;

    let app = api::create_router_with_config(db, &config);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Roommate ledger listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ServerConfig::from_env();

    match cli.command {
        Some(Commands::Serve { port, host, db }) => {
            if db.is_some() {
                config.db_path = db;
            }
            serve(config, &host, port).await?;
        }
        Some(Commands::Status) => {
            let client = LedgerClient::from_env();
            match client.health().await {
                Ok(_) => println!("Roommate ledger is up at {}", client.base_url()),
                Err(e) => {
                    println!("Roommate ledger is not reachable at {}", client.base_url());
                    return Err(e.into());
                }
            }
        }
        Some(Commands::Upcoming { days }) => {
            let upcoming = LedgerClient::from_env().upcoming(days).await?;
            println!("{}", serde_json::to_string_pretty(&upcoming)?);
        }
        Some(Commands::Summary) => {
            let summary = LedgerClient::from_env().tracker_summary().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Some(Commands::Clear { db }) => {
            if db.is_some() {
                config.db_path = db;
            }
            let db = config.open_database()?;
            db.migrate()?;

            let report = Ledger::new(db).clear()?;
            println!(
                "Cleared {} roommates, {} chores, {} bills",
                report.roommates, report.chores, report.bills
            );
        }
        None => {
            serve(config, "127.0.0.1", DEFAULT_PORT).await?;
        }
    }

    Ok(())
}
