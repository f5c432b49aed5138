// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use std::{io, path::PathBuf, process::ExitStatus};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("command not found: {}", _0)]
    NotFound(String),
    #[error("failed to execute {}: {}", _0, _1)]
    Io(String, io::Error),
    #[error("{command} exited with {status}: {stderr}")]
    Failed { command: String, status: ExitStatus, stderr: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to start bus runtime: {}", _0)]
    Runtime(io::Error),
    #[error("display configuration bus call failed: {}", _0)]
    Bus(#[from] zbus::Error),
    #[error("no active monitor found")]
    NoMonitor,
    #[error("refresh rate {}Hz is not available at the current resolution", _0)]
    UnsupportedRate(u32),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read config file at {:?}: {}", _0, _1)]
    Read(PathBuf, io::Error),
    #[error("failed to parse config: {}", _0)]
    Parse(#[from] toml::de::Error),
}
