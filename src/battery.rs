// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::{
    command::{self, Runner},
    config::BatteryConfig,
    cpu::ASUSCTL,
};
use serde::Serialize;
use std::{fs, io, path::Path};

const CAPACITY: &str = "capacity";
const STATUS: &str = "status";
const END_THRESHOLD: &str = "charge_control_end_threshold";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatteryInfo {
    /// Percent
    pub capacity: Option<u8>,
    /// `Charging`, `Discharging`, `Full`, `Not charging`, ...
    pub status:   Option<String>,
}

impl BatteryInfo {
    pub fn is_empty(&self) -> bool { self.capacity.is_none() && self.status.is_none() }
}

pub struct Battery<'a> {
    runner: &'a dyn Runner,
    config: &'a BatteryConfig,
}

impl<'a> Battery<'a> {
    pub fn new(runner: &'a dyn Runner, config: &'a BatteryConfig) -> Self { Self { runner, config } }

    pub fn info(&self) -> BatteryInfo {
        let device = self.config.device_path();
        if !device.exists() {
            log::warn!("{} does not exist", device.display());
            return BatteryInfo::default();
        }

        BatteryInfo {
            capacity: read_attribute(&device.join(CAPACITY)).and_then(|value| parse_percent(&value)),
            status:   read_attribute(&device.join(STATUS)),
        }
    }

    pub fn charge_limit(&self) -> Option<u8> {
        read_attribute(&self.config.device_path().join(END_THRESHOLD))
            .and_then(|value| parse_percent(&value))
    }

    /// Asks `asusd` to apply the limit; the sysfs attribute is not written directly.
    pub fn set_charge_limit(&self, limit: u8) -> bool {
        if !self.in_range(limit) {
            log::error!(
                "charge limit {} out of range: should be {}-{}",
                limit,
                self.config.min_limit,
                self.config.max_limit
            );
            return false;
        }

        log::info!("Setting battery charge limit to {}%", limit);
        let limit = limit.to_string();
        command::output(self.runner, ASUSCTL, &["-c", limit.as_str()]).is_some()
    }

    pub fn in_range(&self, limit: u8) -> bool {
        (self.config.min_limit..=self.config.max_limit).contains(&limit)
    }
}

fn read_attribute(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(value) => Some(value.trim().to_owned()).filter(|value| !value.is_empty()),
        Err(why) if why.kind() == io::ErrorKind::NotFound => {
            log::warn!("{} does not exist", path.display());
            None
        }
        Err(why) => {
            log::error!("{}: failed to read value: {}", path.display(), why);
            None
        }
    }
}

fn parse_percent(value: &str) -> Option<u8> {
    match value.parse::<u8>() {
        Ok(percent) if percent <= 100 => Some(percent),
        Ok(percent) => {
            log::warn!("ignoring out of range percentage {}", percent);
            None
        }
        Err(why) => {
            log::error!("failed to parse percentage {:?}: {}", value, why);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::mock::MockRunner;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn power_supply(files: &[(&str, &str)]) -> (TempDir, BatteryConfig) {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("BAT0");
        fs::create_dir(&device).unwrap();
        for (name, contents) in files {
            fs::write(device.join(name), contents).unwrap();
        }

        let config = BatteryConfig { power_supply: dir.path().to_owned(), ..BatteryConfig::default() };
        (dir, config)
    }

    #[test]
    fn charge_limit_from_sysfs() {
        let (_dir, config) = power_supply(&[(END_THRESHOLD, "80\n")]);
        let runner = MockRunner::new();
        let battery = Battery::new(&runner, &config);

        assert_eq!(battery.charge_limit(), Some(80));
        assert_eq!(battery.charge_limit(), battery.charge_limit());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn info_from_sysfs() {
        let (_dir, config) = power_supply(&[(CAPACITY, "57\n"), (STATUS, "Discharging\n")]);
        let runner = MockRunner::new();
        let info = Battery::new(&runner, &config).info();

        assert_eq!(info.capacity, Some(57));
        assert_eq!(info.status.as_deref(), Some("Discharging"));
        assert!(!info.is_empty());
    }

    #[test]
    fn partial_info() {
        let (_dir, config) = power_supply(&[(STATUS, "Full")]);
        let runner = MockRunner::new();
        let info = Battery::new(&runner, &config).info();

        assert_eq!(info, BatteryInfo { capacity: None, status: Some("Full".to_owned()) });
    }

    #[test]
    fn missing_battery_is_unknown() {
        let config =
            BatteryConfig { power_supply: PathBuf::from("/nonexistent"), ..BatteryConfig::default() };
        let runner = MockRunner::new();
        let battery = Battery::new(&runner, &config);

        assert!(battery.info().is_empty());
        assert_eq!(battery.charge_limit(), None);
    }

    #[test]
    fn garbage_limit_is_unknown() {
        let (_dir, config) = power_supply(&[(END_THRESHOLD, "eighty")]);
        let runner = MockRunner::new();
        assert_eq!(Battery::new(&runner, &config).charge_limit(), None);
        assert_eq!(parse_percent("101"), None);
    }

    #[test]
    fn set_limit_runs_asusctl() {
        let runner = MockRunner::new().output("asusctl -c 80", "");
        let config = BatteryConfig::default();
        let battery = Battery::new(&runner, &config);

        assert!(battery.set_charge_limit(80));
        assert_eq!(runner.calls(), vec!["asusctl -c 80"]);
    }

    #[test]
    fn out_of_range_limit_never_spawns() {
        let runner = MockRunner::new().output("asusctl -c 59", "").output("asusctl -c 101", "");
        let config = BatteryConfig::default();
        let battery = Battery::new(&runner, &config);

        assert!(!battery.set_charge_limit(59));
        assert!(!battery.set_charge_limit(101));
        assert!(battery.in_range(60));
        assert!(battery.in_range(100));
        assert!(runner.calls().is_empty());
    }
}
