//! Viewer client
//!
//! Ties the viewer state, the signature wizard and a [`SigningConnector`]
//! together. Every failure ends up as a transient [`Notification`]; none of
//! them leaves the client in an unusable state.

use std::time::Instant;

use docsign_common::error::DOCUMENT_ERROR_MESSAGE;
use docsign_common::{Error, SignResponse, SignatureRequest, SignatureResult};
use tracing::instrument;

use crate::client::{HttpClient, SigningConnector};
use crate::notification::Notification;
use crate::retry::RetryPolicy;
use crate::viewer::{count_pages, DocumentSource, ViewerState};
use crate::wizard::{Wizard, WizardTransition};

/// Shown when a submission fails without a usable server message
pub const SIGN_FAILED_MESSAGE: &str = "Failed to sign document. Please try again.";

/// Viewer client
#[derive(Debug)]
pub struct ViewerClient<C = HttpClient>
where
    C: SigningConnector,
{
    connector: C,
    viewer: ViewerState,
    wizard: Option<Wizard>,
    signature_complete: bool,
    notification: Option<Notification>,
    retry_policy: RetryPolicy,
}

impl<C> ViewerClient<C>
where
    C: SigningConnector,
{
    /// Create new [`ViewerClient`] showing the service's default document
    pub fn new(connector: C) -> Result<Self, Error> {
        let source = DocumentSource::Remote(connector.document_url()?);

        Ok(Self {
            connector,
            viewer: ViewerState::new(source),
            wizard: None,
            signature_complete: false,
            notification: None,
            retry_policy: RetryPolicy::default(),
        })
    }

    /// Policy for the availability probe run before each submission
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Underlying connector
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Viewer state
    pub fn viewer(&self) -> &ViewerState {
        &self.viewer
    }

    /// Mutable viewer state, for pagination and zoom
    pub fn viewer_mut(&mut self) -> &mut ViewerState {
        &mut self.viewer
    }

    /// Whether the current document has been signed
    pub fn signature_complete(&self) -> bool {
        self.signature_complete
    }

    /// Current notification, unless it has expired
    pub fn notification(&self) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|notification| !notification.is_expired())
    }

    /// Drop the notification if it is expired at `now`
    pub fn dismiss_expired(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|notification| notification.is_expired_at(now))
        {
            self.notification = None;
        }
    }

    /// Drop the notification
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Open the wizard, starting over if it was already open
    pub fn open_wizard(&mut self) -> &mut Wizard {
        self.wizard.insert(Wizard::new())
    }

    /// Open wizard
    pub fn wizard(&self) -> Option<&Wizard> {
        self.wizard.as_ref()
    }

    /// Open wizard, mutable
    pub fn wizard_mut(&mut self) -> Option<&mut Wizard> {
        self.wizard.as_mut()
    }

    /// Close the wizard and discard what was entered
    pub fn close_wizard(&mut self) {
        self.wizard = None;
    }

    /// Show a file picked by the user
    ///
    /// Only `application/pdf` is accepted. A rejected file leaves the viewer
    /// untouched and raises an error notification.
    pub fn select_local_file<S>(
        &mut self,
        file_name: S,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<(), Error>
    where
        S: Into<String>,
    {
        let source = match DocumentSource::local(file_name, mime, bytes) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!("Rejected local file of type {}", mime);
                self.notification = Some(Notification::error(err.to_string()));
                return Err(err);
            }
        };

        tracing::debug!("Switching to local document {}", source.display_name());
        self.switch_source(source);

        Ok(())
    }

    /// Go back to the service's default document
    pub fn use_default_document(&mut self) -> Result<(), Error> {
        let url = self.connector.document_url()?;
        self.switch_source(DocumentSource::Remote(url));

        Ok(())
    }

    fn switch_source(&mut self, source: DocumentSource) {
        self.viewer.set_source(source);
        self.signature_complete = false;
    }

    /// Fetch the current document and record its page count
    #[instrument(skip(self))]
    pub async fn load_document(&mut self) -> Result<Vec<u8>, Error> {
        let result = match self.viewer.source() {
            DocumentSource::Local { bytes, .. } => Ok(bytes.clone()),
            DocumentSource::Remote(url) => self.connector.fetch_document(url).await,
        };

        let bytes = match result {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!("Could not load document: {}", err);
                self.notification = Some(Notification::error(DOCUMENT_ERROR_MESSAGE));
                return Err(err);
            }
        };

        match count_pages(&bytes) {
            Ok(count) => self.viewer.set_page_count(count),
            Err(err) => tracing::warn!("Could not determine page count: {}", err),
        }

        Ok(bytes)
    }

    /// Advance the open wizard, submitting on completion
    ///
    /// Returns the submission result once the review step is confirmed, and
    /// `None` while the wizard is still collecting input.
    pub async fn advance_wizard(&mut self) -> Result<Option<SignatureResult>, Error> {
        let wizard = self
            .wizard
            .as_mut()
            .ok_or_else(|| Error::validation("Signature wizard is not open"))?;

        match wizard.next()? {
            WizardTransition::Advanced(step) => {
                tracing::debug!("Wizard moved to {}", step);
                Ok(None)
            }
            WizardTransition::Completed(request) => Ok(Some(self.submit_signature(request).await)),
        }
    }

    /// Submit a signature
    ///
    /// The service is probed with [`SigningConnector::get_status`] under the
    /// retry policy, then the request is posted exactly once.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn submit_signature(&mut self, request: SignatureRequest) -> SignatureResult {
        let outcome = self.send(&request).await;

        match outcome {
            Ok(response) => {
                tracing::info!("Signature accepted: {}", response.message);
                self.signature_complete = true;
                self.wizard = None;
                self.notification = Some(Notification::success(response.message.clone()));
                SignatureResult::signed(response.message)
            }
            Err(err) => {
                tracing::warn!("Signature rejected: {}", err);
                let message = user_message(&err);
                self.notification = Some(Notification::error(message.clone()));
                SignatureResult::failed(message)
            }
        }
    }

    async fn send(&self, request: &SignatureRequest) -> Result<SignResponse, Error> {
        let connector = &self.connector;

        self.retry_policy
            .retry(|| connector.get_status())
            .await?;

        connector.post_sign(request).await
    }
}

fn user_message(err: &Error) -> String {
    match err {
        Error::Validation(message) | Error::Auth(message) | Error::Server { message, .. }
            if !message.trim().is_empty() =>
        {
            message.clone()
        }
        _ => SIGN_FAILED_MESSAGE.to_string(),
    }
}
