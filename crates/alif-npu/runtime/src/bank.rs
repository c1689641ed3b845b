// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bank of independent ALIF neurons
//!
//! Neurons in a bank share a clock but no state: each core reads only its own
//! registers and parameters, so one edge across the bank is stepped in
//! parallel with rayon. Edges themselves stay strictly sequential.

use alif_npu_neural::{AlifParameters, CycleInputs, CycleOutputs, NeuronCore};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, RuntimeError};

#[derive(Debug, Clone)]
pub struct NeuronBank {
    cores: Vec<NeuronCore>,
    params: Vec<AlifParameters>,
    cycle: u64,
}

impl NeuronBank {
    /// One post-reset core per parameter set
    pub fn new(params: Vec<AlifParameters>) -> Self {
        let cores = params
            .iter()
            .map(|p| NeuronCore::new(p.threshold_min))
            .collect();
        Self {
            cores,
            params,
            cycle: 0,
        }
    }

    /// `count` cores sharing one parameter set
    pub fn uniform(params: AlifParameters, count: usize) -> Self {
        Self::new(vec![params; count])
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn core(&self, index: usize) -> Option<&NeuronCore> {
        self.cores.get(index)
    }

    pub fn parameters(&self, index: usize) -> Option<&AlifParameters> {
        self.params.get(index)
    }

    pub fn set_parameters(&mut self, index: usize, params: AlifParameters) -> Result<()> {
        let len = self.params.len();
        let slot = self
            .params
            .get_mut(index)
            .ok_or(RuntimeError::InvalidNeuronIndex { index, len })?;
        *slot = params;
        Ok(())
    }

    /// Drive one edge with per-neuron inputs
    ///
    /// # Errors
    ///
    /// `ArraySizeMismatch` if `inputs` does not hold one record per neuron. No
    /// core is clocked in that case.
    pub fn step_all(&mut self, inputs: &[CycleInputs]) -> Result<Vec<CycleOutputs>> {
        if inputs.len() != self.cores.len() {
            return Err(RuntimeError::ArraySizeMismatch {
                expected: self.cores.len(),
                actual: inputs.len(),
            });
        }

        let outputs: Vec<CycleOutputs> = self
            .cores
            .par_iter_mut()
            .zip(self.params.par_iter())
            .zip(inputs.par_iter())
            .map(|((core, params), inputs)| core.clock(params, inputs))
            .collect();

        self.finish_edge(&outputs);
        Ok(outputs)
    }

    /// Drive one edge with the same inputs on every neuron
    pub fn broadcast(&mut self, inputs: &CycleInputs) -> Vec<CycleOutputs> {
        let outputs: Vec<CycleOutputs> = self
            .cores
            .par_iter_mut()
            .zip(self.params.par_iter())
            .map(|(core, params)| core.clock(params, inputs))
            .collect();

        self.finish_edge(&outputs);
        outputs
    }

    /// Current output pins of every neuron
    pub fn outputs(&self) -> Vec<CycleOutputs> {
        self.cores.iter().map(NeuronCore::outputs).collect()
    }

    pub fn spike_mask(&self) -> Vec<bool> {
        self.cores.iter().map(|c| c.outputs().spike_out).collect()
    }

    fn finish_edge(&mut self, outputs: &[CycleOutputs]) {
        let spikes = outputs.iter().filter(|o| o.spike_out).count();
        if spikes > 0 {
            debug!(cycle = self.cycle, spikes, neurons = outputs.len(), "bank edge");
        }
        self.cycle += 1;
    }
}
