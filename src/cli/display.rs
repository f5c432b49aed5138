// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use super::print_list;
use crate::controller::Controller;
use anyhow::bail;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List refresh rates available at the current resolution
    List,

    /// Get current refresh rate
    Get,

    /// Set refresh rate
    Set {
        /// Refresh rate in Hz (e.g. 60, 120, 165)
        rate: u32,
    },
}

impl Command {
    pub fn run(&self, controller: &Controller) -> anyhow::Result<()> {
        match *self {
            Self::List => {
                let rates = controller.refresh_rates();
                if rates.is_empty() {
                    bail!("Could not get refresh rates");
                }
                print_list("Available refresh rates", &rates, "Hz");
            }
            Self::Get => match controller.current_refresh_rate() {
                Some(rate) => println!("Current refresh rate: {}Hz", rate),
                None => bail!("Could not get current refresh rate"),
            },
            Self::Set { rate } => {
                if !controller.set_refresh_rate(rate) {
                    bail!("Failed to set refresh rate to {}Hz", rate);
                }
                println!("Refresh rate set to {}Hz", rate);
            }
        }

        Ok(())
    }
}
