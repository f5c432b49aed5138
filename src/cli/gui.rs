// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use anyhow::{bail, Context};
use std::{io, process::Command};

/// Separately installed graphical front-end.
const GUI: &str = "w-helper-gui";

pub fn run() -> anyhow::Result<()> {
    log::info!("Launching {}", GUI);
    let status = match Command::new(GUI).status() {
        Ok(status) => status,
        Err(why) if why.kind() == io::ErrorKind::NotFound => {
            bail!("{} is not installed", GUI)
        }
        Err(why) => return Err(why).context(format!("failed to launch {}", GUI)),
    };

    if !status.success() {
        bail!("{} exited with {}", GUI, status);
    }

    Ok(())
}
