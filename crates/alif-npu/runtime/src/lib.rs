// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # ALIF Runtime
//!
//! Drivers around the platform-agnostic core:
//! - [`CycleDriver`]: explicit clock for one neuron, with per-edge records
//! - [`NeuronBank`]: many independent neurons stepped in parallel per edge
//! - [`Stimulus`] / [`Trace`]: JSON input programs and per-cycle output records

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bank;
pub mod driver;
pub mod error;
pub mod stimulus;
pub mod trace;

pub use bank::NeuronBank;
pub use driver::CycleDriver;
pub use error::{Result, RuntimeError};
pub use stimulus::{Stimulus, StimulusSegment};
pub use trace::{CycleRecord, Trace, TraceSummary};
