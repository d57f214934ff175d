use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use clap::Args;
use docsign_client::viewer::PDF_MIME_TYPE;
use docsign_client::{HttpClient, ViewerClient, WizardStep};
use url::Url;

use crate::sub_commands::{prompt, prompt_secret};

#[derive(Args)]
pub struct SignSubCommand {
    /// Signer name
    #[arg(short, long)]
    name: Option<String>,
    /// Signing PIN
    #[arg(short, long)]
    pin: Option<String>,
    /// Local PDF to sign instead of the service's document
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MIME_TYPE,
        _ => "application/octet-stream",
    }
}

pub async fn sign(server: Url, sub_command_args: &SignSubCommand) -> Result<()> {
    let mut client = ViewerClient::new(HttpClient::new(server))?;

    if let Some(path) = &sub_command_args.file {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        client.select_local_file(file_name, mime_type(path), bytes)?;
    }

    client.load_document().await?;

    let viewer = client.viewer();
    println!(
        "Document: {} ({} pages)",
        viewer.source().display_name(),
        viewer
            .page_count()
            .map(|count| count.to_string())
            .unwrap_or_else(|| "?".to_string())
    );

    let mut name = sub_command_args.name.clone();
    let mut pin = sub_command_args.pin.clone();

    client.open_wizard();

    loop {
        let wizard = client
            .wizard_mut()
            .ok_or_else(|| anyhow!("Signature wizard closed"))?;
        let step = wizard.step();

        println!(
            "[{}/{}] {}",
            step.index() + 1,
            WizardStep::ALL.len(),
            step
        );

        match step {
            WizardStep::EnterName => {
                let value = match name.take() {
                    Some(value) => value,
                    None => prompt("Name")?,
                };
                wizard.set_name(value);
            }
            WizardStep::EnterPin => {
                let value = match pin.take() {
                    Some(value) => value,
                    None => prompt_secret("PIN")?,
                };
                wizard.set_pin(value);
            }
            WizardStep::Review => {
                println!("{}", wizard.summary());

                let answer = prompt(&format!("{} [y/N]", step.primary_action()))?;
                if !answer.trim().eq_ignore_ascii_case("y") {
                    client.close_wizard();
                    println!("Cancelled");
                    return Ok(());
                }
            }
        }

        match client.advance_wizard().await {
            Ok(None) => continue,
            Ok(Some(result)) if result.success => {
                println!("{}", result.message);
                return Ok(());
            }
            Ok(Some(result)) => bail!(result.message),
            Err(err) => println!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type(Path::new("contract.PDF")), PDF_MIME_TYPE);
        assert_eq!(
            mime_type(Path::new("notes.txt")),
            "application/octet-stream"
        );
        assert_eq!(mime_type(Path::new("README")), "application/octet-stream");
    }
}
