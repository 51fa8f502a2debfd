//! Admin Gateway - user management for administrators.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "admin-gateway")]
#[command(about = "Admin user-management gateway in front of PocketBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "ADMIN_GATEWAY_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "ADMIN_GATEWAY_PORT", default_value = "3001")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            admin_gateway_lib::run_embedded(&host, port).await?;
        }
    }

    Ok(())
}
