//! Command-line client for the config facade.
//!
//! Fetches server configuration through the same cached store the library
//! exposes and prints it as JSON.
//!
//! ```text
//! config-facade --base-url http://localhost:8000 flows
//! config-facade --config client.toml all
//! ```

use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use config_facade::config::validation::validate_config;
use config_facade::config::{load_config, ClientConfig, ConfigError};
use config_facade::observability::{logging, metrics};
use config_facade::{ConfigFacade, HttpApiClient, Subscription};

#[derive(Parser)]
#[command(name = "config-facade")]
#[command(about = "Fetch and print server-side configuration", long_about = None)]
struct Cli {
    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `api.base_url`.
    #[arg(short, long)]
    base_url: Option<String>,

    /// Give up waiting for a resource after this many seconds.
    #[arg(short, long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List flow descriptors
    Flows,
    /// Show approval configuration
    Approval,
    /// Show UI configuration
    Ui,
    /// Load everything and print the store snapshot
    All,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_level);

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let client = HttpApiClient::new(&config.api)?;
    let facade = ConfigFacade::new(Arc::new(client));
    let limit = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Commands::Flows => {
            let flows = wait_for("flow_descriptors", facade.flow_descriptors(), limit).await?;
            let sorted: BTreeMap<_, _> = flows.iter().collect();
            print_json(&sorted)?;
        }
        Commands::Approval => {
            let approval = wait_for("approval_config", facade.approval_config(), limit).await?;
            print_json(&*approval)?;
        }
        Commands::Ui => {
            let ui = wait_for("ui_config", facade.ui_config(), limit).await?;
            print_json(&*ui)?;
        }
        Commands::All => {
            let (flows, approval, ui) = tokio::join!(
                wait_for("flow_descriptors", facade.flow_descriptors(), limit),
                wait_for("approval_config", facade.approval_config(), limit),
                wait_for("ui_config", facade.ui_config(), limit),
            );
            for result in [flows.map(drop), approval.map(drop), ui.map(drop)] {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "Resource missing from snapshot");
                }
            }
            print_json(&facade.store().state())?;
        }
    }

    Ok(())
}

async fn wait_for<T: Send + Sync + 'static>(
    name: &str,
    mut sub: Subscription<T>,
    limit: Duration,
) -> Result<Arc<T>, Box<dyn Error>> {
    match tokio::time::timeout(limit, sub.next()).await {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(format!("{} cache was dropped", name).into()),
        Err(_) => Err(format!(
            "{} not loaded within {}s (check the log for fetch errors)",
            name,
            limit.as_secs()
        )
        .into()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
