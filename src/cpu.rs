// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::command::{self, Runner};
use once_cell::sync::Lazy;
use regex::Regex;

pub const ASUSCTL: &str = "asusctl";

static ACTIVE_PROFILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Active profile is\s*(\w+)").expect("active profile pattern is valid")
});

/// Platform profiles managed by `asusd`, queried and set through `asusctl profile`.
pub struct CpuProfiles<'a> {
    runner: &'a dyn Runner,
}

impl<'a> CpuProfiles<'a> {
    pub fn new(runner: &'a dyn Runner) -> Self { Self { runner } }

    pub fn list(&self) -> Vec<String> {
        command::output(self.runner, ASUSCTL, &["profile", "-l"])
            .map(|stdout| parse_profiles(&stdout))
            .unwrap_or_default()
    }

    pub fn current(&self) -> Option<String> {
        let stdout = command::output(self.runner, ASUSCTL, &["profile", "-p"])?;
        let profile = parse_active_profile(&stdout);
        if profile.is_none() {
            log::warn!("no active profile in asusctl output: {:?}", stdout);
        }
        profile
    }

    pub fn set(&self, profile: &str) -> bool {
        log::info!("Setting CPU profile to {}", profile);
        command::output(self.runner, ASUSCTL, &["profile", "-P", profile]).is_some()
    }
}

fn parse_profiles(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains("Starting"))
        .map(String::from)
        .collect()
}

fn parse_active_profile(stdout: &str) -> Option<String> {
    ACTIVE_PROFILE.captures(stdout).map(|captures| captures[1].to_owned())
}
