// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

#![deny(clippy::all)]
#![deny(unused_crate_dependencies)]
#![deny(unused_imports)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod battery;
pub mod cli;
pub mod command;
pub mod config;
pub mod controller;
pub mod cpu;
pub mod display;
pub mod errors;
pub mod gpu;
pub mod logging;

pub use self::controller::{Controller, Domain, Status, StatusChange};
