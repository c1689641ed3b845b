// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neuron Models
//!
//! Clocked neuron models. Each model exposes a pure clock-edge function over
//! its register file plus a small owning wrapper for drivers.

pub mod alif;

// Re-export core types
pub use alif::{step, transition, AlifParameters, NeuronCore, TransitionKind};
