use std::path::PathBuf;

use clap::Parser;

use metadata_guard::config::{self, Overrides};
use metadata_guard::lifecycle::{signals, Shutdown};
use metadata_guard::observability::logging;
use metadata_guard::{net, HttpServer};

#[derive(Parser)]
#[command(name = "metadata-guard")]
#[command(about = "Loopback guard in front of the instance metadata service", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port (overrides the file and $PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level or tracing filter directive.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = Overrides {
        port: cli.port,
        log_level: cli.log_level,
        ..Overrides::from_env()
    };
    let config = config::load_config(cli.config.as_deref(), &overrides)?;

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        port = config.listener.port,
        upstream = %config.upstream,
        "metadata-guard v0.1.0 starting"
    );

    let listener = match net::bind(&config.listener).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start listener");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::forward_to(&signal_shutdown).await;
    });

    HttpServer::new(&config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
