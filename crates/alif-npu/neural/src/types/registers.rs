// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Register file and per-cycle I/O records of the ALIF neuron

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use super::fixed::{U4, U6, U7};
use crate::dynamics::membrane_readout;

/// Register state of one neuron, as latched on the last clock edge
///
/// `v_mem` is a 9-bit signed register in hardware but every write clamps it to
/// [0, 255], so the latched value always fits in `u8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct NeuronState {
    /// Membrane potential
    pub v_mem: u8,

    /// Adaptive firing threshold
    pub threshold: u8,

    /// Refractory countdown; nonzero means refractory
    pub refr_cnt: U4,

    /// Cycles since the last leak application
    pub leak_counter: U4,

    /// Registered spike output flop
    pub spike_out: bool,
}

impl NeuronState {
    /// Register contents right after a reset pulse
    pub const fn reset(threshold_min: u8) -> Self {
        Self {
            v_mem: 0,
            threshold: threshold_min,
            refr_cnt: U4::ZERO,
            leak_counter: U4::ZERO,
            spike_out: false,
        }
    }

    #[inline]
    pub const fn is_refractory(&self) -> bool {
        !self.refr_cnt.is_zero()
    }

    /// Output pins as seen while this state is latched
    #[inline]
    pub fn outputs(&self) -> CycleOutputs {
        CycleOutputs {
            spike_out: self.spike_out,
            v_mem_out: membrane_readout(self.v_mem),
        }
    }
}

/// Input pins sampled on one clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct CycleInputs {
    /// Synchronous reset, dominates every other input
    pub reset: bool,
    pub enable: bool,
    pub input_enable: bool,
    pub chan_a: U6,
}

impl CycleInputs {
    /// Reset pulse
    pub const fn reset() -> Self {
        Self {
            reset: true,
            enable: false,
            input_enable: false,
            chan_a: U6::ZERO,
        }
    }

    /// Enabled cycle integrating `chan_a`
    pub const fn drive(chan_a: U6) -> Self {
        Self {
            reset: false,
            enable: true,
            input_enable: true,
            chan_a,
        }
    }

    /// Enabled cycle with the input gated off; the leak counter still runs
    pub const fn idle() -> Self {
        Self {
            reset: false,
            enable: true,
            input_enable: false,
            chan_a: U6::ZERO,
        }
    }

    /// Core disabled; registers hold
    pub const fn disabled() -> Self {
        Self {
            reset: false,
            enable: false,
            input_enable: false,
            chan_a: U6::ZERO,
        }
    }
}

/// Output pins after a clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct CycleOutputs {
    pub spike_out: bool,
    pub v_mem_out: U7,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_state_uses_threshold_min() {
        let state = NeuronState::reset(37);
        assert_eq!(state.v_mem, 0);
        assert_eq!(state.threshold, 37);
        assert!(!state.is_refractory());
        assert!(!state.spike_out);
    }

    #[test]
    fn test_outputs_follow_latched_registers() {
        let state = NeuronState {
            v_mem: 200,
            spike_out: true,
            ..NeuronState::reset(10)
        };
        let out = state.outputs();
        assert!(out.spike_out);
        assert_eq!(out.v_mem_out.get(), 72);
    }

    #[test]
    fn test_inputs_deserialize_with_defaults() {
        let inputs: CycleInputs =
            serde_json::from_str(r#"{"enable": true, "chan_a": 5}"#).unwrap();
        assert!(inputs.enable);
        assert!(!inputs.reset);
        assert!(!inputs.input_enable);
        assert_eq!(inputs.chan_a.get(), 5);

        assert!(serde_json::from_str::<CycleInputs>(r#"{"chan_a": 64}"#).is_err());
    }
}
