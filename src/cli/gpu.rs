// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use super::print_list;
use crate::controller::Controller;
use anyhow::bail;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available GPU modes
    List,

    /// Get current GPU mode
    Get,

    /// Set GPU mode
    Set {
        /// GPU mode (e.g. Integrated, Hybrid, AsusMuxDgpu)
        mode: String,
    },
}

impl Command {
    pub fn run(&self, controller: &Controller) -> anyhow::Result<()> {
        match self {
            Self::List => {
                let modes = controller.gpu_modes();
                if modes.is_empty() {
                    bail!("Could not get GPU modes");
                }
                print_list("Available GPU modes", &modes, "");
            }
            Self::Get => match controller.current_gpu_mode() {
                Some(mode) => println!("Current GPU mode: {}", mode),
                None => bail!("Could not get current GPU mode"),
            },
            Self::Set { mode } => {
                if !controller.set_gpu_mode(mode) {
                    bail!("Failed to set GPU mode to {}", mode);
                }
                println!("GPU mode set to {}", mode);
                println!("Logout or restart required for changes to take effect");
            }
        }

        Ok(())
    }
}
