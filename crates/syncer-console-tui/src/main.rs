/*
[INPUT]:  CLI arguments, optional bootstrap state file, backend URL
[OUTPUT]: Running admin console TUI with tracing routed to the log buffer
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

mod bootstrap;
mod tui;

use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use syncer_console_api::SyncerClient;

use crate::bootstrap::BootstrapConfig;
use crate::tui::runtime::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, run_tui};

#[derive(Parser, Debug)]
#[command(name = "syncer-console", version, about = "Admin console for the syncer backend")]
struct Cli {
    /// Base URL of the syncer backend
    #[arg(long = "server", value_name = "URL", default_value = "http://127.0.0.1:8000")]
    server: String,
    /// Pre-populated page state (accounts / sync jobs) as served to the UI
    #[arg(long = "bootstrap", value_name = "PATH")]
    bootstrap_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Validate flags and bootstrap state, then exit
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let log_buffer: LogBufferHandle = Arc::new(StdMutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)));
    init_tracing(&args.log_level, log_buffer.clone())?;

    info!(server = %args.server, "starting syncer-console");

    let bootstrap = match args.bootstrap_path.as_deref() {
        Some(path) => BootstrapConfig::from_file(path)
            .with_context(|| format!("load bootstrap state from {}", path.display()))?,
        None => BootstrapConfig::default(),
    };
    info!(
        accounts = bootstrap.accounts.len(),
        jobs = bootstrap.syncer_jobs.len(),
        "bootstrap state loaded"
    );

    let client = SyncerClient::with_base_url(&args.server)
        .map_err(|err| anyhow!("create backend client failed: {err}"))?;

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    run_tui(Arc::new(client), bootstrap, log_buffer).await
}

fn init_tracing(log_level: &str, log_buffer: LogBufferHandle) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(LogWriterFactory::new(log_buffer))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
