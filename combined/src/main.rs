//! Combined binary for development - runs both gateways in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pb-gateways")]
#[command(about = "Public and admin PocketBase gateways in one binary")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both gateways in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PUBLIC_GATEWAY_PORT", default_value = "3000")]
        public_port: u16,
        #[arg(long, env = "ADMIN_GATEWAY_PORT", default_value = "3001")]
        admin_port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            public_port,
            admin_port,
        } => {
            info!("Starting gateways in development mode");
            info!("  Public gateway: http://{}:{}", host, public_port);
            info!("  Admin gateway:  http://{}:{}/admin", host, admin_port);

            let public_host = host.clone();
            let public_handle = tokio::spawn(async move {
                if let Err(e) = public_gateway_lib::run_embedded(&public_host, public_port).await {
                    error!("Public gateway failed: {}", e);
                }
            });

            let admin_host = host.clone();
            let admin_handle = tokio::spawn(async move {
                if let Err(e) = admin_gateway_lib::run_embedded(&admin_host, admin_port).await {
                    error!("Admin gateway failed: {}", e);
                }
            });

            // Either gateway exiting means something went wrong
            tokio::select! {
                _ = public_handle => {
                    error!("Public gateway exited unexpectedly");
                }
                _ = admin_handle => {
                    error!("Admin gateway exited unexpectedly");
                }
            }
        }
    }

    Ok(())
}
