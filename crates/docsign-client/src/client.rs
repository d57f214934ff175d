//! Signing service client

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use docsign_common::{Error, ErrorResponse, SignResponse, SignatureRequest, StatusResponse};
use reqwest::{Client, IntoUrl};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;
use url::Url;

/// Interface to the signing service
#[async_trait]
pub trait SigningConnector: Debug + Send + Sync {
    /// Url of the default document served by this service
    fn document_url(&self) -> Result<Url, Error>;

    /// Availability probe [`GET /api/status`]
    async fn get_status(&self) -> Result<StatusResponse, Error>;

    /// Submit signature [`POST /api/sign`]
    async fn post_sign(&self, request: &SignatureRequest) -> Result<SignResponse, Error>;

    /// Download document bytes
    async fn fetch_document(&self, url: &Url) -> Result<Vec<u8>, Error>;
}

/// Http Client
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    server_url: Url,
}

impl HttpClient {
    /// Create new [`HttpClient`]
    pub fn new(server_url: Url) -> Self {
        Self {
            inner: Client::new(),
            server_url,
        }
    }

    /// Create new [`HttpClientBuilder`]
    pub fn builder(server_url: Url) -> HttpClientBuilder {
        HttpClientBuilder {
            server_url,
            timeout: None,
        }
    }

    /// Base url of the signing service
    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    fn join_paths(&self, paths: &[&str]) -> Result<Url, Error> {
        let mut url = self.server_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::validation(format!("Invalid server url: {}", self.server_url)))?
            .pop_if_empty()
            .extend(paths);

        Ok(url)
    }

    #[inline]
    async fn http_get<U: IntoUrl, R: DeserializeOwned>(&self, url: U) -> Result<R, Error> {
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        handle_response(response).await
    }

    #[inline]
    async fn http_post<U: IntoUrl, P: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        url: U,
        payload: &P,
    ) -> Result<R, Error> {
        let response = self
            .inner
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        handle_response(response).await
    }
}

async fn handle_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, Error> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    if status.is_success() {
        return serde_json::from_str::<R>(&body).map_err(|err| {
            tracing::warn!("Http Response error: {}", err);
            err.into()
        });
    }

    Err(status_error(status.as_u16(), &body))
}

fn status_error(status: u16, body: &str) -> Error {
    let message = ErrorResponse::from_json(body).error;

    tracing::warn!("Signing service returned {}: {}", status, message);

    match status {
        400 => Error::Validation(message),
        401 => Error::Auth(message),
        status => Error::Server { status, message },
    }
}

#[async_trait]
impl SigningConnector for HttpClient {
    fn document_url(&self) -> Result<Url, Error> {
        self.join_paths(&["api", "pdf"])
    }

    #[instrument(skip(self), fields(server_url = %self.server_url))]
    async fn get_status(&self) -> Result<StatusResponse, Error> {
        let url = self.join_paths(&["api", "status"])?;
        self.http_get(url).await
    }

    #[instrument(skip(self, request), fields(server_url = %self.server_url, name = %request.name))]
    async fn post_sign(&self, request: &SignatureRequest) -> Result<SignResponse, Error> {
        let url = self.join_paths(&["api", "sign"])?;
        self.http_post(url, request).await
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_document(&self, url: &Url) -> Result<Vec<u8>, Error> {
        let response = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Builder for [`HttpClient`]
#[derive(Debug)]
pub struct HttpClientBuilder {
    server_url: Url,
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Per-request timeout; unset leaves the transport default
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the [`HttpClient`]
    pub fn build(self) -> Result<HttpClient, Error> {
        let mut builder = Client::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let inner = builder
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(HttpClient {
            inner,
            server_url: self.server_url,
        })
    }
}
