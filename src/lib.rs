use std::path::{Path, PathBuf};

use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use clap::{Parser, Subcommand};

pub mod api;
pub mod cli;
pub mod config;
pub mod docs;
pub mod store;

#[derive(Parser)]
#[command(name = "patient-api")]
#[command(about = "Patient Data API - REST API for patient data to be used with AI agents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server (default)
    Start {
        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Path to the patient dataset
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Path to a TOML or JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a patient dataset without starting the server
    Check {
        /// Path to the patient dataset
        #[arg(short, long, default_value = "dummy_patient_data.json")]
        data: PathBuf,
    },
    /// Initialize a new configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "patient-api.toml")]
        output: String,
    },
    /// Check server status
    Status {
        /// Host to connect to
        #[arg(short, long, default_value = "localhost:8000")]
        host: String,
    },
    /// Print the endpoint reference as Markdown
    Docs,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Start { port, data, config }) => {
            let config = resolve_config(config.as_deref(), port, data)?;
            init_tracing(&config.logging.level);
            start_server(config).await?;
        }
        Some(Commands::Check { data }) => {
            init_tracing("info");
            cli::run_check(&data).await?;
        }
        Some(Commands::Init { output }) => {
            cli::run_init(output).await?;
        }
        Some(Commands::Status { host }) => {
            cli::run_status(host).await?;
        }
        Some(Commands::Docs) => {
            cli::run_docs().await?;
        }
        None => {
            // Default to starting the server if no command provided
            let config = resolve_config(None, None, None)?;
            init_tracing(&config.logging.level);
            start_server(config).await?;
        }
    }

    Ok(())
}

/// Build the effective configuration: file (or environment) first, then
/// command line flags on top.
fn resolve_config(
    file: Option<&Path>,
    port: Option<u16>,
    data: Option<PathBuf>,
) -> Result<config::Config, Box<dyn std::error::Error>> {
    let mut config = match file {
        Some(path) => config::Config::load(path)?,
        None => config::Config::from_env(),
    };

    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(data) = data {
        config.data.path = data;
    }

    if let Err(problems) = config.validate() {
        return Err(format!("Invalid configuration: {}", problems.join("; ")).into());
    }

    Ok(config)
}

/// Initialize Logging/Tracing
fn init_tracing(level: &str) {
    let level: Level = level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");
}

async fn start_server(config: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Patient Data API...");

    let store = std::sync::Arc::new(store::PatientStore::load(&config.data.path));

    let app = api::router(store);

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = std::net::SocketAddr::from((host, config.server.port));
    info!("Patient API listening on {}", addr);

    info!("API Endpoints:");
    info!("  - REST: http://{}/api/patients", addr);
    info!("  - Docs: http://{}/api/docs", addr);
    info!("  - Health: http://{}/health", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
