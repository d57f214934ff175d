//! DocSign viewer client
//!
//! # Example
//!
//! ```no_run
//! use docsign_client::{HttpClient, ViewerClient, WizardTransition};
//!
//! async fn sign() -> Result<(), docsign_client::Error> {
//!     let server = "http://127.0.0.1:3001".parse().expect("valid url");
//!     let mut client = ViewerClient::new(HttpClient::new(server))?;
//!
//!     client.load_document().await?;
//!
//!     let wizard = client.open_wizard();
//!     wizard.set_name("Alice");
//!     wizard.next()?;
//!     wizard.set_pin("1337");
//!     wizard.next()?;
//!
//!     if let Some(result) = client.advance_wizard().await? {
//!         println!("{}", result.message);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod client;
pub mod notification;
pub mod retry;
pub mod viewer;
pub mod viewer_client;
pub mod wizard;

pub use client::{HttpClient, HttpClientBuilder, SigningConnector};
pub use docsign_common::{Error, SignatureRequest, SignatureResult};
pub use notification::{Notification, NotificationKind};
pub use retry::RetryPolicy;
pub use viewer::{DocumentSource, ViewerState};
pub use viewer_client::ViewerClient;
pub use wizard::{Wizard, WizardStep, WizardTransition};
