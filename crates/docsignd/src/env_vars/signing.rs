//! Signing environment variables

use std::env;
use std::path::PathBuf;

use crate::config::Signing;

pub const ENV_PIN: &str = "DOCSIGND_PIN";
pub const ENV_DOCUMENT_PATH: &str = "DOCSIGND_DOCUMENT_PATH";
pub const ENV_SUCCESS_MESSAGE: &str = "DOCSIGND_SUCCESS_MESSAGE";

impl Signing {
    pub fn from_env(mut self) -> Self {
        if let Ok(pin) = env::var(ENV_PIN) {
            self.pin = pin;
        }

        if let Ok(path) = env::var(ENV_DOCUMENT_PATH) {
            self.document_path = PathBuf::from(path);
        }

        if let Ok(message) = env::var(ENV_SUCCESS_MESSAGE) {
            self.success_message = message;
        }

        self
    }
}
