//! Info environment variables

use std::env;
use std::str::FromStr;

use crate::config::{Info, LoggingOutput};

pub const ENV_LISTEN_HOST: &str = "DOCSIGND_LISTEN_HOST";
pub const ENV_LISTEN_PORT: &str = "DOCSIGND_LISTEN_PORT";
pub const ENV_LOGGING_OUTPUT: &str = "DOCSIGND_LOGGING_OUTPUT";
pub const ENV_LOGGING_CONSOLE_LEVEL: &str = "DOCSIGND_LOGGING_CONSOLE_LEVEL";
pub const ENV_LOGGING_FILE_LEVEL: &str = "DOCSIGND_LOGGING_FILE_LEVEL";

impl Info {
    pub fn from_env(mut self) -> Self {
        if let Ok(host) = env::var(ENV_LISTEN_HOST) {
            self.listen_host = host;
        }

        if let Ok(port_str) = env::var(ENV_LISTEN_PORT) {
            match port_str.parse() {
                Ok(port) => self.listen_port = port,
                Err(_) => tracing::warn!(
                    "Invalid listen port '{}' in environment variable, keeping {}",
                    port_str,
                    self.listen_port
                ),
            }
        }

        // Logging configuration
        if let Ok(output_str) = env::var(ENV_LOGGING_OUTPUT) {
            if let Ok(output) = LoggingOutput::from_str(&output_str) {
                self.logging.output = output;
            } else {
                tracing::warn!(
                    "Invalid logging output '{}' in environment variable. Valid options: stdout, file, both",
                    output_str
                );
            }
        }

        if let Ok(console_level) = env::var(ENV_LOGGING_CONSOLE_LEVEL) {
            self.logging.console_level = Some(console_level);
        }

        if let Ok(file_level) = env::var(ENV_LOGGING_FILE_LEVEL) {
            self.logging.file_level = Some(file_level);
        }

        self
    }
}
