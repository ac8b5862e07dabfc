//! Identity Service - database maintenance for the identity store.

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.default_log_filter().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Migrate(args) => identity_service_lib::run_migrations(args.action.into()).await?,
        Commands::Ping => identity_service_lib::ping().await?,
    }

    Ok(())
}
