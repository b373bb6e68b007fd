//! Authorization Service - Entry Point

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use authorization_service::{config::Config, server::AuthServer};

#[derive(Parser, Debug)]
#[command(name = "authorization-service")]
#[command(about = "OAuth 2.0 authorization code issuance service")]
#[command(version)]
struct Cli {
    /// HTTP server port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// JSON file with registered clients (seeds the demo client when omitted)
    #[arg(long, env = "CLIENTS_FILE")]
    clients_file: Option<PathBuf>,

    /// Secret for signing the code cookie (at least 64 bytes)
    #[arg(long, env = "COOKIE_SECRET", hide_env_values = true)]
    cookie_secret: Option<String>,

    /// Drop the Secure attribute from cookies (plain-HTTP local development only)
    #[arg(long)]
    insecure_cookies: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.clients_file.is_some() {
        config.clients_file = cli.clients_file;
    }
    if cli.cookie_secret.is_some() {
        config.cookie_secret = cli.cookie_secret;
    }
    if cli.insecure_cookies {
        config.secure_cookies = false;
    }
    config.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        dotenv = dotenv_loaded,
        config = ?config,
        "Starting authorization service"
    );

    let server = AuthServer::from_config(&config).await?;
    server.run(config.port).await
}
