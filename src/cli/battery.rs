// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::controller::Controller;
use anyhow::bail;
use clap::Subcommand;

/// Bounds accepted by `set-limit` regardless of configuration.
const MIN_LIMIT: u32 = 60;
const MAX_LIMIT: u32 = 100;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get battery capacity and charging status
    Info,

    /// Get current charge limit
    GetLimit,

    /// Set charge limit
    SetLimit {
        /// Charge limit percentage (60-100)
        limit: u32,
    },
}

impl Command {
    pub fn run(&self, controller: &Controller) -> anyhow::Result<()> {
        match *self {
            Self::Info => {
                let info = controller.battery_info();
                if info.is_empty() {
                    bail!("Could not get battery information");
                }

                println!("Battery Information:");
                if let Some(capacity) = info.capacity {
                    println!("  Capacity: {}%", capacity);
                }
                if let Some(status) = info.status {
                    println!("  Status: {}", status);
                }
            }
            Self::GetLimit => match controller.charge_limit() {
                Some(limit) => println!("Current charge limit: {}%", limit),
                None => bail!("Could not get battery charge limit"),
            },
            Self::SetLimit { limit } => {
                if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
                    bail!("Charge limit must be between {} and {}", MIN_LIMIT, MAX_LIMIT);
                }

                let limit = match u8::try_from(limit) {
                    Ok(limit) if controller.charge_limit_in_range(limit) => limit,
                    _ => {
                        let bounds = &controller.config().battery;
                        bail!(
                            "Charge limit {}% is outside the configured range {}-{}",
                            limit,
                            bounds.min_limit,
                            bounds.max_limit
                        )
                    }
                };

                if !controller.set_charge_limit(limit) {
                    bail!("Failed to set battery charge limit to {}%", limit);
                }
                println!("Battery charge limit set to {}%", limit);
            }
        }

        Ok(())
    }
}
