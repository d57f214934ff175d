use std::path::PathBuf;

use config::{Config, ConfigError, File};
use docsign_common::signature::DEFAULT_SUCCESS_MESSAGE;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LISTEN_HOST: &str = "127.0.0.1";
pub const DEFAULT_LISTEN_PORT: u16 = 3001;
pub const DEFAULT_PIN: &str = "1337";
pub const DEFAULT_DOCUMENT_PATH: &str = "public/Dev Challenge.pdf";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoggingOutput {
    /// Console only
    Stdout,
    /// Rolling file in `<work_dir>/logs` only
    File,
    /// Console and file
    #[default]
    Both,
}

impl std::str::FromStr for LoggingOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdout" => Ok(LoggingOutput::Stdout),
            "file" => Ok(LoggingOutput::File),
            "both" => Ok(LoggingOutput::Both),
            _ => Err(format!("Unknown logging output: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoggingConfig {
    pub output: LoggingOutput,
    pub console_level: Option<String>,
    pub file_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub listen_host: String,
    pub listen_port: u16,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            listen_host: DEFAULT_LISTEN_HOST.to_string(),
            listen_port: DEFAULT_LISTEN_PORT,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Signing {
    pub pin: String,
    pub document_path: PathBuf,
    pub success_message: String,
}

impl std::fmt::Debug for Signing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signing")
            .field("pin", &"<redacted>")
            .field("document_path", &self.document_path)
            .field("success_message", &self.success_message)
            .finish()
    }
}

impl Default for Signing {
    fn default() -> Self {
        Self {
            pin: DEFAULT_PIN.to_string(),
            document_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// DocSign settings, derived from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub info: Info,
    pub signing: Signing,
}

impl Settings {
    /// Defaults overlaid with `config_file_name`, when given
    ///
    /// A file that is missing or does not deserialize is an error.
    pub fn new<P>(config_file_name: Option<P>) -> Result<Self, ConfigError>
    where
        P: Into<PathBuf>,
    {
        let default_settings = Self::default();

        let builder = Config::builder()
            // use defaults
            .add_source(Config::try_from(&default_settings)?);

        let builder = match config_file_name {
            // override with file contents
            Some(path) => builder.add_source(File::from(path.into())),
            None => builder,
        };

        builder.build()?.try_deserialize()
    }
}
