// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Stimulus programs
//!
//! A stimulus is an ordered list of segments, each holding one input record
//! for `repeat` consecutive clock edges. Stored as JSON:
//!
//! ```json
//! {
//!   "name": "spike_train",
//!   "segments": [
//!     { "inputs": { "reset": true } },
//!     { "repeat": 20, "inputs": { "enable": true, "input_enable": true, "chan_a": 2 } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use alif_npu_neural::CycleInputs;
use serde::{Deserialize, Serialize};

use crate::error::Result;

fn one() -> u32 {
    1
}

/// `inputs` applied on `repeat` consecutive edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulusSegment {
    #[serde(default = "one")]
    pub repeat: u32,
    pub inputs: CycleInputs,
}

/// Cycle-indexed input program for one neuron
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stimulus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub segments: Vec<StimulusSegment>,
}

impl Stimulus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same inputs on every edge
    pub fn constant(inputs: CycleInputs, cycles: u32) -> Self {
        Self::new().hold(inputs, cycles)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append `inputs` for `repeat` edges; zero-length segments are dropped
    pub fn hold(mut self, inputs: CycleInputs, repeat: u32) -> Self {
        if repeat > 0 {
            self.segments.push(StimulusSegment { repeat, inputs });
        }
        self
    }

    /// Append `inputs` for a single edge
    pub fn then(self, inputs: CycleInputs) -> Self {
        self.hold(inputs, 1)
    }

    pub fn total_cycles(&self) -> u64 {
        self.segments.iter().map(|s| s.repeat as u64).sum()
    }

    /// Expand to one input record per edge
    pub fn cycles(&self) -> impl Iterator<Item = CycleInputs> + '_ {
        self.segments
            .iter()
            .flat_map(|s| std::iter::repeat(s.inputs).take(s.repeat as usize))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
