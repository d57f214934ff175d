//! DocSign CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use url::Url;

mod sub_commands;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3001";

/// Terminal front-end for the DocSign signing service
#[derive(Parser)]
#[command(name = "docsign-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Signing service url
    #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
    server: Url,
    /// Logging level
    #[arg(short, long, default_value = "error")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the service is up
    Status,
    /// Download the default document
    Fetch(sub_commands::fetch::FetchSubCommand),
    /// Sign a document
    Sign(sub_commands::sign::SignSubCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();
    let default_filter = args.log_level;

    let hyper_filter = "hyper=warn";
    let reqwest_filter = "reqwest=warn";

    let env_filter = EnvFilter::new(format!(
        "{},{},{}",
        default_filter, hyper_filter, reqwest_filter
    ));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match &args.command {
        Commands::Status => sub_commands::status::status(args.server.clone()).await,
        Commands::Fetch(sub_command_args) => {
            sub_commands::fetch::fetch(args.server.clone(), sub_command_args).await
        }
        Commands::Sign(sub_command_args) => {
            sub_commands::sign::sign(args.server.clone(), sub_command_args).await
        }
    }
}
