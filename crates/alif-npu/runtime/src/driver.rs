// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Cycle Driver
//!
//! Stands in for the hardware clock. The driver owns one core and the
//! parameters handed over by the loader, and advances the core exactly once
//! per call to [`CycleDriver::tick`]. Nothing runs between ticks.

use alif_npu_neural::{
    AlifParameters, CycleInputs, CycleOutputs, NeuronCore, NeuronState, TransitionKind,
};
use tracing::{debug, info, trace, warn};

use crate::stimulus::Stimulus;
use crate::trace::{CycleRecord, Trace};

/// Records reserved up front for a run; longer runs grow the trace as they go
const MAX_PREALLOCATED_RECORDS: u64 = 1 << 20;

fn trace_capacity(total_cycles: u64) -> usize {
    total_cycles.min(MAX_PREALLOCATED_RECORDS) as usize
}

#[derive(Debug, Clone)]
pub struct CycleDriver {
    core: NeuronCore,
    params: AlifParameters,
    cycle: u64,
}

impl CycleDriver {
    /// Driver over a core in its post-reset state
    pub fn new(params: AlifParameters) -> Self {
        Self {
            core: NeuronCore::new(params.threshold_min),
            params,
            cycle: 0,
        }
    }

    /// Driver over a core with preloaded registers
    pub fn with_state(params: AlifParameters, state: NeuronState) -> Self {
        Self {
            core: NeuronCore::from_state(state),
            params,
            cycle: 0,
        }
    }

    /// Number of edges driven so far
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn state(&self) -> &NeuronState {
        self.core.state()
    }

    pub fn parameters(&self) -> &AlifParameters {
        &self.params
    }

    /// Loader hands over a new parameter set; takes effect on the next edge
    pub fn set_parameters(&mut self, params: AlifParameters) {
        debug!(
            cycle = self.cycle,
            weight_a = params.weight_a.get(),
            leak_rate = params.leak_rate,
            threshold_min = params.threshold_min,
            leak_cycles = params.leak_cycles.get(),
            params_ready = params.params_ready,
            "parameters updated"
        );
        self.params = params;
    }

    /// Pins visible before the next edge
    pub fn outputs(&self) -> CycleOutputs {
        self.core.outputs()
    }

    /// Drive one clock edge
    pub fn tick(&mut self, inputs: CycleInputs) -> CycleRecord {
        let (transition, outputs) = self.core.clock_with_kind(&self.params, &inputs);
        let record = CycleRecord {
            cycle: self.cycle,
            inputs,
            transition,
            state: *self.core.state(),
            outputs,
        };

        match transition {
            TransitionKind::Fire => debug!(
                cycle = self.cycle,
                threshold = record.state.threshold,
                "spike"
            ),
            TransitionKind::Reset => debug!(cycle = self.cycle, "reset"),
            _ => trace!(
                cycle = self.cycle,
                ?transition,
                v_mem = record.state.v_mem,
                threshold = record.state.threshold,
                refr_cnt = record.state.refr_cnt.get(),
                leak_counter = record.state.leak_counter.get(),
                "edge"
            ),
        }

        self.cycle += 1;
        record
    }

    /// Drive every edge of `stimulus` and collect the trace
    pub fn run(&mut self, stimulus: &Stimulus) -> Trace {
        let total = stimulus.total_cycles();
        if !self.params.params_ready {
            warn!("running with params_ready low; the core will hold on every non-reset edge");
        }
        info!(
            name = stimulus.name.as_deref().unwrap_or("<unnamed>"),
            cycles = total,
            start_cycle = self.cycle,
            "stimulus run started"
        );

        let mut trace = Trace::with_capacity(trace_capacity(total));
        for inputs in stimulus.cycles() {
            trace.push(self.tick(inputs));
        }

        let summary = trace.summary();
        info!(
            cycles = summary.cycles,
            spikes = summary.spikes,
            firing_rate = summary.firing_rate,
            "stimulus run finished"
        );
        trace
    }

    /// Drive the same inputs for `cycles` edges
    pub fn run_for(&mut self, inputs: CycleInputs, cycles: u32) -> Trace {
        self.run(&Stimulus::constant(inputs, cycles))
    }
}
