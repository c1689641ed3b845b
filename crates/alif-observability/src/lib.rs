// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # alif-observability
//!
//! Logging setup shared by the ALIF tools, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: per-run JSON log files under a timestamped directory

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Crates that emit log events and accept `--debug-<crate>`
pub const KNOWN_CRATES: &[&str] = &["alif-npu-runtime", "alif-testbench"];
