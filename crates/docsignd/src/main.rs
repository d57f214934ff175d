//! DocSign signing daemon
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

use anyhow::Result;
use clap::Parser;
use docsignd::cli::CLIArgs;
use docsignd::{get_work_directory, load_settings, run_docsignd, setup_tracing, shutdown_signal};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let work_dir = get_work_directory(&args)?;
    let settings = load_settings(&work_dir, args.config)?;

    // Dropping the guard flushes buffered file logs, so it lives until exit
    let _log_guard = if args.disable_logging {
        None
    } else {
        setup_tracing(&work_dir, &settings.info.logging)?
    };

    tracing::debug!("Loaded settings: {:?}", settings);

    run_docsignd(&settings, shutdown_signal()).await
}
