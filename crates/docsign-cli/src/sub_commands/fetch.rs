use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use docsign_client::{HttpClient, ViewerClient};
use url::Url;

#[derive(Args)]
pub struct FetchSubCommand {
    /// File to write the document to
    #[arg(short, long)]
    output: PathBuf,
}

pub async fn fetch(server: Url, sub_command_args: &FetchSubCommand) -> Result<()> {
    let mut client = ViewerClient::new(HttpClient::new(server))?;

    let bytes = client.load_document().await?;
    tokio::fs::write(&sub_command_args.output, &bytes).await?;

    let pages = client
        .viewer()
        .page_count()
        .map(|count| count.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!(
        "Saved {} ({} bytes, {} pages)",
        sub_command_args.output.display(),
        bytes.len(),
        pages
    );

    Ok(())
}
