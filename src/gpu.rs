// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::command::{self, Runner};

pub const SUPERGFXCTL: &str = "supergfxctl";

/// Graphics modes managed by `supergfxd`.
pub struct GpuModes<'a> {
    runner: &'a dyn Runner,
}

impl<'a> GpuModes<'a> {
    pub fn new(runner: &'a dyn Runner) -> Self { Self { runner } }

    pub fn list(&self) -> Vec<String> {
        command::output(self.runner, SUPERGFXCTL, &["-s"])
            .map(|stdout| parse_modes(&stdout))
            .unwrap_or_default()
    }

    pub fn current(&self) -> Option<String> {
        command::output(self.runner, SUPERGFXCTL, &["--get"])
            .map(|stdout| stdout.trim().to_owned())
            .filter(|mode| !mode.is_empty())
    }

    pub fn set(&self, mode: &str) -> bool {
        log::info!("Setting graphics mode to {}", mode);
        command::output(self.runner, SUPERGFXCTL, &["-m", mode]).is_some()
    }
}

/// Accepts either `[Integrated, Hybrid]` or one mode per line.
fn parse_modes(stdout: &str) -> Vec<String> {
    let stdout = stdout.trim();

    if let Some(inner) = stdout.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return inner
            .split(',')
            .map(str::trim)
            .filter(|mode| !mode.is_empty())
            .map(String::from)
            .collect();
    }

    stdout
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.starts_with("Available") && !line.starts_with("Current")
        })
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::mock::MockRunner;

    #[test]
    fn bracketed_list() {
        let runner = MockRunner::new().output("supergfxctl -s", "[Integrated, Hybrid, Discrete]");
        let gpu = GpuModes::new(&runner);
        assert_eq!(gpu.list(), vec!["Integrated", "Hybrid", "Discrete"]);
    }

    #[test]
    fn line_list() {
        let stdout = "Available modes:\nIntegrated\n  Hybrid\n\nCurrent mode: Hybrid\nAsusMuxDgpu\n";
        assert_eq!(parse_modes(stdout), vec!["Integrated", "Hybrid", "AsusMuxDgpu"]);
    }

    #[test]
    fn bracketed_list_drops_empty_items() {
        assert_eq!(parse_modes("[Integrated,,Hybrid, ]"), vec!["Integrated", "Hybrid"]);
        assert!(parse_modes("[]").is_empty());
    }

    #[test]
    fn current_mode() {
        let runner = MockRunner::new()
            .output("supergfxctl --get", "Hybrid\n")
            .output("supergfxctl -m Integrated", "Graphics mode changed to Integrated");
        let gpu = GpuModes::new(&runner);
        assert_eq!(gpu.current().as_deref(), Some("Hybrid"));
        assert_eq!(gpu.current(), gpu.current());
        assert!(gpu.set("Integrated"));
        assert!(!gpu.set("Vfio"));
    }

    #[test]
    fn empty_current_is_unknown() {
        let runner = MockRunner::new().output("supergfxctl --get", "  ");
        assert_eq!(GpuModes::new(&runner).current(), None);
    }
}
