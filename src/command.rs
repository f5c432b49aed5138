// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::errors::CommandError;
use std::{
    env, io,
    path::Path,
    process::{Command, Stdio},
};

/// Executes external utilities on behalf of the adapters.
pub trait Runner {
    /// Runs `program` with `args`, returning trimmed stdout when it exits successfully.
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;

    /// Whether `program` can be found in `PATH`.
    fn exists(&self, program: &str) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let command = [program].iter().chain(args).copied().collect::<Vec<_>>().join(" ");
        log::debug!("running {}", command);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|why| match why.kind() {
                io::ErrorKind::NotFound => CommandError::NotFound(program.to_owned()),
                _ => CommandError::Io(command.clone(), why),
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
        } else {
            Err(CommandError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            })
        }
    }

    fn exists(&self, program: &str) -> bool {
        env::var_os("PATH")
            .map_or(false, |paths| env::split_paths(&paths).any(|dir| is_executable(&dir.join(program))))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().map_or(false, |meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool { path.is_file() }

/// Runs a command, logging and discarding the error.
pub(crate) fn output<R: Runner + ?Sized>(runner: &R, program: &str, args: &[&str]) -> Option<String> {
    match runner.run(program, args) {
        Ok(stdout) => Some(stdout),
        Err(why) => {
            log::error!("{}", why);
            None
        }
    }
}
