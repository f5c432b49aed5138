// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::{
    battery::{Battery, BatteryInfo},
    command::{Runner, SystemRunner},
    config::Config,
    cpu::{CpuProfiles, ASUSCTL},
    display::{Display, DisplayBackend, MutterDisplayConfig},
    gpu::{GpuModes, SUPERGFXCTL},
};
use serde::Serialize;
use std::{cell::RefCell, fmt, rc::Rc};

/// Utilities the adapters shell out to, with a description for diagnostics.
pub const REQUIRED_TOOLS: &[(&str, &str)] =
    &[(ASUSCTL, "ASUS Control utility"), (SUPERGFXCTL, "SuperGFX Control utility")];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Cpu,
    Gpu,
    Display,
    Battery,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Domain::Cpu => "cpu",
            Domain::Gpu => "gpu",
            Domain::Display => "display",
            Domain::Battery => "battery",
        })
    }
}

/// Outcome of a set operation, delivered to subscribers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub domain:  Domain,
    pub message: String,
    pub success: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Status {
    pub cpu_profile:  Option<String>,
    pub gpu_mode:     Option<String>,
    pub refresh_rate: Option<u32>,
    pub battery:      BatteryInfo,
    pub charge_limit: Option<u8>,
}

type Listener = Rc<dyn Fn(&StatusChange)>;

/// Facade over the CPU, GPU, display and battery adapters.
pub struct Controller {
    config:        Config,
    runner:        Box<dyn Runner>,
    display:       Box<dyn DisplayBackend>,
    missing_tools: Vec<&'static str>,
    listeners:     RefCell<Vec<Listener>>,
}

impl Controller {
    pub fn new(config: Config) -> Self {
        Self::with_backends(config, Box::new(SystemRunner), Box::new(MutterDisplayConfig))
    }

    pub fn with_backends(
        config: Config,
        runner: Box<dyn Runner>,
        display: Box<dyn DisplayBackend>,
    ) -> Self {
        let missing_tools = REQUIRED_TOOLS
            .iter()
            .filter(|(tool, _)| !runner.exists(tool))
            .map(|&(tool, _)| tool)
            .collect::<Vec<_>>();

        if !missing_tools.is_empty() {
            let described = REQUIRED_TOOLS
                .iter()
                .filter(|(tool, _)| missing_tools.contains(tool))
                .map(|(tool, description)| format!("{} ({})", tool, description))
                .collect::<Vec<_>>();
            log::warn!("Missing tools: {}", described.join(", "));
        }

        Self { config, runner, display, missing_tools, listeners: RefCell::new(Vec::new()) }
    }

    pub fn config(&self) -> &Config { &self.config }

    /// Required tools that were not found in `PATH` at startup.
    pub fn missing_tools(&self) -> &[&'static str] { &self.missing_tools }

    pub fn subscribe<F: Fn(&StatusChange) + 'static>(&self, listener: F) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn emit(&self, domain: Domain, success: bool, message: String) -> bool {
        let change = StatusChange { domain, message, success };
        // Listeners may subscribe from inside a callback.
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&change);
        }
        success
    }

    fn cpu(&self) -> CpuProfiles<'_> { CpuProfiles::new(self.runner.as_ref()) }

    fn gpu(&self) -> GpuModes<'_> { GpuModes::new(self.runner.as_ref()) }

    fn display(&self) -> Display<'_> {
        Display::new(self.display.as_ref(), self.config.display.persistent)
    }

    fn battery(&self) -> Battery<'_> { Battery::new(self.runner.as_ref(), &self.config.battery) }

    pub fn cpu_profiles(&self) -> Vec<String> { self.cpu().list() }

    pub fn current_cpu_profile(&self) -> Option<String> { self.cpu().current() }

    pub fn set_cpu_profile(&self, profile: &str) -> bool {
        if self.cpu().set(profile) {
            self.emit(Domain::Cpu, true, format!("CPU profile set to {}", profile))
        } else {
            self.emit(Domain::Cpu, false, format!("Failed to set CPU profile to {}", profile))
        }
    }

    pub fn gpu_modes(&self) -> Vec<String> { self.gpu().list() }

    pub fn current_gpu_mode(&self) -> Option<String> { self.gpu().current() }

    pub fn set_gpu_mode(&self, mode: &str) -> bool {
        if self.gpu().set(mode) {
            self.emit(
                Domain::Gpu,
                true,
                format!("GPU mode set to {} (logout or restart may be required)", mode),
            )
        } else {
            self.emit(Domain::Gpu, false, format!("Failed to set GPU mode to {}", mode))
        }
    }

    pub fn refresh_rates(&self) -> Vec<u32> { self.display().available() }

    pub fn current_refresh_rate(&self) -> Option<u32> { self.display().current() }

    pub fn set_refresh_rate(&self, rate: u32) -> bool {
        if self.display().set(rate) {
            self.emit(Domain::Display, true, format!("Refresh rate set to {}Hz", rate))
        } else {
            self.emit(Domain::Display, false, format!("Failed to set refresh rate to {}Hz", rate))
        }
    }

    pub fn battery_info(&self) -> BatteryInfo { self.battery().info() }

    pub fn charge_limit(&self) -> Option<u8> { self.battery().charge_limit() }

    pub fn charge_limit_in_range(&self, limit: u8) -> bool { self.battery().in_range(limit) }

    pub fn set_charge_limit(&self, limit: u8) -> bool {
        if self.battery().set_charge_limit(limit) {
            self.emit(Domain::Battery, true, format!("Battery charge limit set to {}%", limit))
        } else {
            self.emit(Domain::Battery, false, format!("Failed to set battery limit to {}%", limit))
        }
    }

    pub fn status(&self) -> Status {
        Status {
            cpu_profile:  self.current_cpu_profile(),
            gpu_mode:     self.current_gpu_mode(),
            refresh_rate: self.current_refresh_rate(),
            battery:      self.battery_info(),
            charge_limit: self.charge_limit(),
        }
    }
}
