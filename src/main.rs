//! Issue puller service.
//!
//! ```text
//!   any request ──▶ http server ──▶ issue handler ──▶ forwarder ──▶ GET api.github.com
//!                                                                     /repos/{org}/{repo}/issues
//!   raw body    ◀────────────────────────────────────────────────────┘
//! ```
//!
//! `watch` runs the polling consumer against a running puller instead.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::net::TcpListener;

use issue_puller::config::load_config;
use issue_puller::observability::{logging, metrics};
use issue_puller::watcher::IssueWatcher;
use issue_puller::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "issue-puller")]
#[command(about = "Relay a repository's GitHub issue listing over HTTP", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the issue listing (default)
    Serve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override listener.bind_address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Poll a running puller and log new or modified issues
    Watch {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override watcher.source_url
        #[arg(short, long)]
        source: Option<String>,

        /// Override watcher.period_ms
        #[arg(short, long)]
        period_ms: Option<u64>,

        /// Label issues carrying a `/kind <name>` command (needs GITHUB_TOKEN)
        #[arg(long)]
        label: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve {
        config: None,
        bind: None,
    }) {
        Commands::Serve { config, bind } => serve(config, bind).await,
        Commands::Watch {
            config,
            source,
            period_ms,
            label,
        } => watch(config, source, period_ms, label).await,
    }
}

async fn serve(
    config_path: Option<PathBuf>,
    bind: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("issue-puller v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        github = ?config.github,
        upstream_timeout_secs = ?config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn watch(
    config_path: Option<PathBuf>,
    source: Option<String>,
    period_ms: Option<u64>,
    label: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(source) = source {
        config.watcher.source_url = source;
    }
    if let Some(period_ms) = period_ms {
        config.watcher.period_ms = period_ms;
    }
    config.watcher.label_issues |= label;

    logging::init_logging(&config.observability);

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let watcher = IssueWatcher::new(&config.watcher, &config.github.token)?;
    watcher.run(shutdown.subscribe()).await;
    Ok(())
}
