use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::Config;
use database::DbRepository;
use std::path::PathBuf;
use web_server::{AppState, Service};

/// The main entry point for the ReservaFacil services.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = configuration::logging::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, config).await,
        Commands::Migrate => handle_migrate(config).await,
        Commands::CheckDb => handle_check_db(config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// HTTP services for restaurant table reservations and their audit log.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./reserva.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one or both HTTP services.
    Serve(ServeArgs),
    /// Apply the database migrations and exit.
    Migrate,
    /// Verify that the database is reachable.
    CheckDb,
}

#[derive(Parser)]
struct ServeArgs {
    /// Which service to run.
    #[arg(value_enum, default_value_t = ServiceArg::All)]
    service: ServiceArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ServiceArg {
    Audit,
    Reservations,
    All,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Builds the shared pool once and serves the requested services on it.
async fn handle_serve(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let pool = database::connect(&config.database)?;
    if config.database.run_migrations {
        database::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }
    let state = AppState::new(DbRepository::new(pool));

    let audit_addr = config.audit_server.socket_addr()?;
    let reservations_addr = config.reservations_server.socket_addr()?;

    match args.service {
        ServiceArg::Audit => web_server::run_server(Service::Audit, audit_addr, state).await,
        ServiceArg::Reservations => {
            web_server::run_server(Service::Reservations, reservations_addr, state).await
        }
        ServiceArg::All => {
            tokio::try_join!(
                web_server::run_server(Service::Audit, audit_addr, state.clone()),
                web_server::run_server(Service::Reservations, reservations_addr, state),
            )?;
            Ok(())
        }
    }
}

async fn handle_migrate(config: Config) -> anyhow::Result<()> {
    let pool = database::connect(&config.database)?;
    database::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied.");
    Ok(())
}

async fn handle_check_db(config: Config) -> anyhow::Result<()> {
    let pool = database::connect(&config.database)?;
    database::ping(&pool)
        .await
        .context("Database is not reachable")?;
    tracing::info!("Database is reachable.");
    Ok(())
}
