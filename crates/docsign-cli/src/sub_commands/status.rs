use anyhow::Result;
use docsign_client::{HttpClient, RetryPolicy, SigningConnector};
use url::Url;

pub async fn status(server: Url) -> Result<()> {
    let client = HttpClient::new(server);

    let status = RetryPolicy::default()
        .retry(|| client.get_status())
        .await?;

    println!("{}: {}", client.server_url(), status.status);

    Ok(())
}
