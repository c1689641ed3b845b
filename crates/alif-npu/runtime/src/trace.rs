// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-cycle traces
//!
//! A trace holds one record per clock edge: the inputs sampled, the branch the
//! core took, the register file latched on the edge and the output pins after it.

use std::fs;
use std::path::Path;

use alif_npu_neural::{CycleInputs, CycleOutputs, NeuronState, TransitionKind};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    /// Zero-based edge number since the driver was created
    pub cycle: u64,
    pub inputs: CycleInputs,
    pub transition: TransitionKind,
    pub state: NeuronState,
    pub outputs: CycleOutputs,
}

/// Aggregate view of a trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub cycles: u64,
    pub spikes: u64,
    pub firing_rate: f64,
    pub resets: u64,
    pub held_cycles: u64,
    pub refractory_cycles: u64,
    pub peak_v_mem: u8,
    pub final_threshold: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub records: Vec<CycleRecord>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: CycleRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&CycleRecord> {
        self.records.last()
    }

    /// Edges on which `spike_out` was written high
    pub fn spike_cycles(&self) -> Vec<u64> {
        self.records
            .iter()
            .filter(|r| r.outputs.spike_out)
            .map(|r| r.cycle)
            .collect()
    }

    pub fn spike_count(&self) -> u64 {
        self.records.iter().filter(|r| r.outputs.spike_out).count() as u64
    }

    /// Spikes per edge; 0.0 for an empty trace
    pub fn firing_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.spike_count() as f64 / self.records.len() as f64
    }

    pub fn v_mem_series(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.state.v_mem).collect()
    }

    fn count(&self, kind: TransitionKind) -> u64 {
        self.records.iter().filter(|r| r.transition == kind).count() as u64
    }

    pub fn summary(&self) -> TraceSummary {
        TraceSummary {
            cycles: self.records.len() as u64,
            spikes: self.spike_count(),
            firing_rate: self.firing_rate(),
            resets: self.count(TransitionKind::Reset),
            held_cycles: self.count(TransitionKind::Hold),
            refractory_cycles: self.count(TransitionKind::Refractory),
            peak_v_mem: self.records.iter().map(|r| r.state.v_mem).max().unwrap_or(0),
            final_threshold: self.last().map(|r| r.state.threshold),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cycle: u64, transition: TransitionKind, v_mem: u8, spike_out: bool) -> CycleRecord {
        let state = NeuronState {
            v_mem,
            spike_out,
            ..NeuronState::reset(10)
        };
        CycleRecord {
            cycle,
            inputs: CycleInputs::idle(),
            transition,
            state,
            outputs: state.outputs(),
        }
    }

    #[test]
    fn test_empty_trace_summary() {
        let summary = Trace::new().summary();
        assert_eq!(summary.cycles, 0);
        assert_eq!(summary.firing_rate, 0.0);
        assert_eq!(summary.final_threshold, None);
    }

    #[test]
    fn test_summary_counts_branches() {
        let mut trace = Trace::new();
        trace.push(record(0, TransitionKind::Reset, 0, false));
        trace.push(record(1, TransitionKind::Integrate, 7, false));
        trace.push(record(2, TransitionKind::Fire, 0, true));
        trace.push(record(3, TransitionKind::Refractory, 0, false));

        assert_eq!(trace.spike_cycles(), vec![2]);
        assert_eq!(trace.v_mem_series(), vec![0, 7, 0, 0]);

        let summary = trace.summary();
        assert_eq!(summary.cycles, 4);
        assert_eq!(summary.spikes, 1);
        assert_eq!(summary.firing_rate, 0.25);
        assert_eq!(summary.resets, 1);
        assert_eq!(summary.refractory_cycles, 1);
        assert_eq!(summary.peak_v_mem, 7);
        assert_eq!(summary.final_threshold, Some(10));
    }

    #[test]
    fn test_json_roundtrip_preserves_records() {
        let mut trace = Trace::new();
        trace.push(record(0, TransitionKind::Fire, 0, true));

        let json = trace.to_json().unwrap();
        assert!(json.contains("\"transition\": \"fire\""));
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }
}
