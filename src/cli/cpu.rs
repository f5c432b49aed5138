// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use super::print_list;
use crate::controller::Controller;
use anyhow::bail;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available CPU profiles
    List,

    /// Get current CPU profile
    Get,

    /// Set CPU profile
    Set {
        /// Profile name (e.g. Balanced, Performance, Quiet)
        profile: String,
    },
}

impl Command {
    pub fn run(&self, controller: &Controller) -> anyhow::Result<()> {
        match self {
            Self::List => {
                let profiles = controller.cpu_profiles();
                if profiles.is_empty() {
                    bail!("Could not get CPU profiles");
                }
                print_list("Available CPU profiles", &profiles, "");
            }
            Self::Get => match controller.current_cpu_profile() {
                Some(profile) => println!("Current CPU profile: {}", profile),
                None => bail!("Could not get current CPU profile"),
            },
            Self::Set { profile } => {
                if !controller.set_cpu_profile(profile) {
                    bail!("Failed to set CPU profile to {}", profile);
                }
                println!("CPU profile set to {}", profile);
            }
        }

        Ok(())
    }
}
