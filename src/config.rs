// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::errors::ConfigError;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const SYSTEM: &str = "/etc/w-helper/config.toml";
const ENV_OVERRIDE: &str = "W_HELPER_CONFIG";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub battery: BatteryConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatteryConfig {
    /// Directory holding the power supply class devices.
    pub power_supply: PathBuf,
    pub device:       String,
    pub min_limit:    u8,
    pub max_limit:    u8,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            power_supply: PathBuf::from("/sys/class/power_supply"),
            device:       "BAT0".to_owned(),
            min_limit:    60,
            max_limit:    100,
        }
    }
}

impl BatteryConfig {
    pub fn device_path(&self) -> PathBuf { self.power_supply.join(&self.device) }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Store refresh rate changes in the compositor's monitor configuration.
    pub persistent: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self { Self { persistent: true } }
}

impl Config {
    /// Loads the configuration file, falling back to defaults when it is missing or invalid.
    pub fn new() -> Self {
        let path = env::var_os(ENV_OVERRIDE).map_or_else(|| PathBuf::from(SYSTEM), PathBuf::from);

        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Config::default();
        }

        match Config::from_path(&path) {
            Ok(config) => config,
            Err(why) => {
                log::warn!("{}", why);
                Config::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data =
            fs::read_to_string(path).map_err(|why| ConfigError::Read(path.to_owned(), why))?;
        Config::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        let mut config = toml::from_str::<Self>(data)?;
        config.battery.clamp();
        Ok(config)
    }
}

impl BatteryConfig {
    fn clamp(&mut self) {
        self.min_limit = self.min_limit.min(100);
        self.max_limit = self.max_limit.min(100);
        self.max_limit = self.max_limit.max(self.min_limit);
    }
}
