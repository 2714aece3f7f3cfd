//! # Configuration Module
//!
//! Handles loading and validating module configuration from TOML files.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::inputs::SwitchSource;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub module: ModuleConfig,
}

/// External module configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ModuleConfig {
    /// Model identifier sent in the model-select one-shot
    #[serde(default)]
    pub model_id: u8,

    /// How armed/disarmed status is conveyed to the module
    #[serde(default)]
    pub arming_mode: ArmingMode,

    /// Switch evaluated for the commanded-armed byte in Switch mode
    #[serde(default)]
    pub arming_trigger: Option<SwitchSource>,
}

/// Whether armed status travels on a fixed channel or in an explicit extra
/// byte after the channel data
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArmingMode {
    /// Module reads armed status from a channel (e.g. CH5)
    #[default]
    Channel,
    /// Commanded-armed status sent in an extra status byte
    Switch,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or TOML parsing fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)?;

        config.validate();
        info!(
            model_id = config.module.model_id,
            arming_mode = ?config.module.arming_mode,
            "Loaded module configuration"
        );

        Ok(config)
    }

    /// Warn about suspicious but workable combinations.
    ///
    /// Switch arming mode without a configured trigger is legal; the
    /// commanded-armed byte simply always reads disarmed.
    pub fn validate(&self) {
        if self.module.arming_mode == ArmingMode::Switch && self.module.arming_trigger.is_none() {
            warn!("Switch arming mode with no arming trigger; module will never read armed");
        }
    }
}
