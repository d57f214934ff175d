//! DocSign common types

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod error;
pub mod signature;

pub use error::{Error, ErrorResponse};
pub use signature::{SignResponse, SignatureRequest, SignatureResult, StatusResponse};
