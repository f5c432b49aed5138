// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::controller::{Controller, Status};
use std::fmt;

const UNKNOWN: &str = "Unknown";

#[derive(clap::Args, Debug)]
pub struct Command {
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

impl Command {
    pub fn run(&self, controller: &Controller) -> anyhow::Result<()> {
        let status = controller.status();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&status)?);
        } else {
            print!("{}", render(&status));
        }

        Ok(())
    }
}

fn render(status: &Status) -> String {
    fn or_unknown<T: fmt::Display>(value: Option<T>, suffix: &str) -> String {
        value.map_or_else(|| UNKNOWN.to_owned(), |value| format!("{}{}", value, suffix))
    }

    let battery = if status.battery.is_empty() {
        UNKNOWN.to_owned()
    } else {
        format!(
            "{} ({})",
            or_unknown(status.battery.capacity, "%"),
            status.battery.status.as_deref().unwrap_or(UNKNOWN)
        )
    };

    format!(
        "W-Helper System Status\n\
         ======================\n\
         CPU Profile: {}\n\
         GPU Mode: {}\n\
         Refresh Rate: {}\n\
         Battery: {}\n\
         Charge Limit: {}\n",
        or_unknown(status.cpu_profile.as_deref(), ""),
        or_unknown(status.gpu_mode.as_deref(), ""),
        or_unknown(status.refresh_rate, "Hz"),
        battery,
        or_unknown(status.charge_limit, "%"),
    )
}
