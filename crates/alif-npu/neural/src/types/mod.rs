// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neural Types Module
//!
//! Fixed-width integers, the register file and the per-cycle I/O records.

pub mod error;
pub mod fixed;
pub mod registers;

pub use error::{AlifError, Error, Result};
pub use fixed::{SInt, UInt, S9, U3, U4, U6, U7};
pub use registers::{CycleInputs, CycleOutputs, NeuronState};
