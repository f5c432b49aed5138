// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::{config::Config, controller::Controller};
use clap::{Parser, Subcommand};
use log::LevelFilter;

mod battery;
mod cpu;
mod display;
mod gpu;
mod gui;
mod status;

/// Control center for ASUS ROG Zephyrus G14 laptops
#[derive(Parser, Debug)]
#[command(name = "w-helper", version)]
pub struct Args {
    /// Only print command output, no log messages
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print debug log messages
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Off
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// CPU profile control
    #[command(subcommand)]
    Cpu(cpu::Command),

    /// GPU mode control
    #[command(subcommand)]
    Gpu(gpu::Command),

    /// Display refresh rate control
    #[command(subcommand)]
    Display(display::Command),

    /// Battery charge control
    #[command(subcommand)]
    Battery(battery::Command),

    /// Show system status
    Status(status::Command),

    /// Launch the graphical interface
    Gui,
}

impl Command {
    pub fn run(&self) -> anyhow::Result<()> {
        if let Self::Gui = self {
            return gui::run();
        }

        let controller = Controller::new(Config::new());
        self.run_with(&controller)
    }

    pub fn run_with(&self, controller: &Controller) -> anyhow::Result<()> {
        match self {
            Self::Cpu(command) => command.run(controller),
            Self::Gpu(command) => command.run(controller),
            Self::Display(command) => command.run(controller),
            Self::Battery(command) => command.run(controller),
            Self::Status(command) => command.run(controller),
            Self::Gui => gui::run(),
        }
    }
}

/// Prints a heading followed by one bullet per item.
fn print_list<T: std::fmt::Display>(heading: &str, items: &[T], suffix: &str) {
    println!("{}:", heading);
    for item in items {
        println!("  • {}{}", item, suffix);
    }
}
