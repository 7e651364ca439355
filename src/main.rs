//! Jobdeck - database-backed job scheduling service.
//!
//! Main entry point for the jobdeck CLI and server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobdeck_api::{ApiConfig, ApiServer, AppState, CronRegistrar};
use jobdeck_config::{Config, ConfigLoader, LoggingConfig};
use jobdeck_store::SqliteJobStore;

/// Jobdeck CLI.
#[derive(Parser)]
#[command(name = "jobdeck")]
#[command(about = "Database-backed job scheduling service")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,
}

/// Initialize tracing with console and file output.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = ConfigLoader::expand_path(&logging.dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(logging.file.as_str())
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the appender guard alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer (human-readable text format with colors)
        .with(fmt::layer().with_target(true).with_ansi(true))
        // File layer (text format without colors)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = ConfigLoader::expand_path(&config.database.path);
    let store = SqliteJobStore::open(&db_path).await?;
    let registrar = CronRegistrar::new();

    let state = Arc::new(AppState::new(Arc::new(store), Arc::new(registrar)));
    let server = ApiServer::new(
        ApiConfig::new(config.server.host.clone(), config.server.port),
        state,
    );

    info!("Starting jobdeck on {} (database: {})", server.addr(), db_path);
    server.run().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        ConfigLoader::load(&cli.config)?
    } else {
        Config::default()
    };

    init_tracing(&config.logging)?;

    match cli.command {
        Some(Commands::Serve) | None => serve(config).await,
    }
}
