//! DocSign daemon lib

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use docsign_axum::{create_signing_router, SigningConfig};
use tokio::net::TcpListener;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::cli::CLIArgs;
use crate::config::{LoggingConfig, LoggingOutput, Settings};

pub mod cli;
pub mod config;
pub mod env_vars;

/// Working directory under `$HOME` when none is given
pub const DEFAULT_WORK_DIR: &str = ".docsignd";

const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_PREFIX: &str = "docsignd.log";

fn expand_path(path: &str) -> Option<PathBuf> {
    if let Some(remainder) = path.strip_prefix("~/") {
        home::home_dir().map(|home_dir| home_dir.join(remainder))
    } else {
        Some(PathBuf::from(path))
    }
}

/// Resolve and create the working directory
pub fn get_work_directory(args: &CLIArgs) -> Result<PathBuf> {
    let work_dir = match &args.work_dir {
        Some(work_dir) => work_dir.clone(),
        None => home::home_dir()
            .ok_or(anyhow!("Unknown home dir"))?
            .join(DEFAULT_WORK_DIR),
    };

    fs::create_dir_all(&work_dir)?;

    Ok(work_dir)
}

/// Load settings from defaults, config file and environment
///
/// Without an explicit `config_path`, `<work_dir>/config.toml` is read if it
/// exists.
pub fn load_settings(work_dir: &Path, config_path: Option<PathBuf>) -> Result<Settings> {
    let config_path = config_path.or_else(|| {
        let default_path = work_dir.join("config.toml");
        default_path.exists().then_some(default_path)
    });

    let mut settings = Settings::new(config_path)?;

    settings.from_env()
}

fn env_filter(level: &str) -> EnvFilter {
    let hyper_filter = "hyper=warn";
    let h2_filter = "h2=warn";

    EnvFilter::new(format!("{level},{hyper_filter},{h2_filter}"))
}

/// Install the global tracing subscriber
///
/// File output rolls daily under `<work_dir>/logs`. The returned guard must be
/// kept alive for buffered file logs to be written.
pub fn setup_tracing(work_dir: &Path, logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let console_level = logging
        .console_level
        .as_deref()
        .unwrap_or(DEFAULT_LOG_LEVEL);

    if logging.output == LoggingOutput::Stdout {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(console_level))
            .try_init()
            .map_err(|err| anyhow!(err))?;

        return Ok(None);
    }

    let file_level = logging.file_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
    let logs_dir = work_dir.join("logs");
    fs::create_dir_all(&logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(env_filter(file_level));

    let console_layer = (logging.output == LoggingOutput::Both).then(|| {
        tracing_subscriber::fmt::layer().with_filter(env_filter(console_level))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    tracing::info!("Writing logs to {}", logs_dir.display());

    Ok(Some(guard))
}

/// Build the router configuration from settings
pub fn signing_config(settings: &Settings) -> SigningConfig {
    let signing = &settings.signing;

    let document_path = signing
        .document_path
        .to_str()
        .and_then(expand_path)
        .unwrap_or_else(|| signing.document_path.clone());

    if !document_path.is_file() {
        tracing::warn!(
            "Document {} does not exist, /api/pdf will fail until it does",
            document_path.display()
        );
    }

    SigningConfig::new(signing.pin.clone(), document_path)
        .with_success_message(signing.success_message.clone())
}

/// Serve the signing router on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, settings: &Settings, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_signing_router(signing_config(settings));

    tracing::info!("docsignd listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("docsignd stopped");

    Ok(())
}

/// Bind the configured address and serve until `shutdown` resolves
pub async fn run_docsignd<F>(settings: &Settings, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!(
        "{}:{}",
        settings.info.listen_host, settings.info.listen_port
    );
    let listener = TcpListener::bind(&addr).await?;

    serve(listener, settings, shutdown).await
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Could not listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
