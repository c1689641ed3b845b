// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # ALIF Neural Core (Platform-Agnostic)
//!
//! Bit-exact, cycle-accurate model of a synchronous Adaptive
//! Leaky-Integrate-and-Fire neuron:
//! - **Types**: fixed-width registers (`UInt`, `SInt`), the register file and I/O records
//! - **Dynamics**: single datapath elements (weighted sum, clamp, threshold adaptation)
//! - **Models**: the clock-edge function and the `NeuronCore` wrapper
//!
//! ## Target Platforms
//! - ✅ Desktop (Linux, macOS, Windows)
//! - ✅ Embedded (`default-features = false`, no allocation)
//! - ✅ WASM

#![cfg_attr(not(feature = "std"), no_std)]

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod types;

pub mod dynamics;

pub mod models;

// Re-export everything for convenience
pub use dynamics::*;

pub use types::{
    AlifError, CycleInputs, CycleOutputs, Error, NeuronState, Result, SInt, UInt, S9, U3, U4, U6,
    U7,
};

pub use models::{step, transition, AlifParameters, NeuronCore, TransitionKind};
