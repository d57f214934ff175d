//! Environment variables module
//!
//! Environment variables override values from the config file, one file per
//! settings section.

mod info;
mod signing;

use anyhow::{bail, Result};
pub use info::*;
pub use signing::*;

use crate::config::Settings;

impl Settings {
    pub fn from_env(&mut self) -> Result<Self> {
        self.info = self.info.clone().from_env();
        self.signing = self.signing.clone().from_env();

        if self.signing.pin.trim().is_empty() {
            bail!("Signing PIN must be set");
        }

        Ok(self.clone())
    }
}
