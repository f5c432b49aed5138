// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use fern::{Dispatch, InitError};
use log::LevelFilter;
use std::io;

/// Installs the stderr logger; command output stays on stdout.
pub fn setup(filter: LevelFilter) -> Result<(), InitError> {
    dispatch(filter).chain(io::stderr()).apply()?;
    Ok(())
}

/// Records from this crate at `filter`. With `--verbose`, bus warnings from
/// `zbus` are let through too and every line carries its target.
fn dispatch(filter: LevelFilter) -> Dispatch {
    let verbose = filter >= LevelFilter::Debug;
    let bus = if verbose { LevelFilter::Warn } else { LevelFilter::Off };

    Dispatch::new()
        .level(LevelFilter::Off)
        .level_for("w_helper", filter)
        .level_for("zbus", bus)
        .format(move |out, message, record| {
            if verbose {
                out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
            } else {
                out.finish(format_args!("[{}] {}", record.level(), message))
            }
        })
}
