// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use clap::{CommandFactory, Parser};
use std::process;
use w_helper::{cli::Args, logging};

fn main() {
    let args = Args::parse();

    if let Err(why) = logging::setup(args.log_level()) {
        eprintln!("failed to set up logging: {}", why);
        process::exit(1);
    }

    let Some(command) = args.command else {
        if let Err(why) = Args::command().print_help() {
            eprintln!("w-helper: {}", why);
            process::exit(1);
        }
        return;
    };

    if let Err(why) = command.run() {
        eprintln!("w-helper: {:#}", why);
        process::exit(1);
    }
}
