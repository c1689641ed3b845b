// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # ALIF (Adaptive Leaky-Integrate-and-Fire) Neuron Core
//!
//! Cycle-accurate model of a single synchronous ALIF neuron.
//!
//! ## Clock Edge
//!
//! ```text
//! reset                         → registers cleared, threshold = threshold_min
//! !(enable && params_ready)     → hold, spike_out = 0
//! otherwise:
//!     apply_leak   = leak_counter >= leak_cycles
//!     leak_counter = apply_leak ? 0 : leak_counter + 1
//!
//!     refr_cnt != 0             → refr_cnt -= 1, spike_out = 0
//!     input_enable:
//!         new_v = clamp(v_mem + s9(chan_a × weight_a) - (apply_leak ? leak_rate : 0), 0, 255)
//!         new_v >= threshold    → FIRE: v_mem = 0, refr_cnt = 4,
//!                                       threshold = min(threshold + 4, threshold_max)
//!         else                  → v_mem = new_v,
//!                                 apply_leak ? threshold = max(threshold - 1, threshold_min)
//!     else                      → hold v_mem/threshold/refr_cnt, spike_out = 0
//! ```
//!
//! Every branch reads only the pre-edge register file and returns a complete
//! next-state snapshot. Exactly one branch runs per edge.

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::dynamics::{
    decay_threshold, integrate, leak_due, next_leak_counter, raise_threshold, threshold_max,
    weighted_sum, REFRACTORY_CYCLES,
};
use crate::types::{CycleInputs, CycleOutputs, NeuronState, U3, U4};

/// Parameters supplied by the external loader
///
/// The loader owns range checking; the bit widths of `weight_a` and
/// `leak_cycles` are enforced by their types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct AlifParameters {
    /// Synaptic weight of the input channel (3 bits)
    pub weight_a: U3,

    /// Charge removed on a leak cycle
    pub leak_rate: u8,

    /// Lower bound of the adaptive threshold
    pub threshold_min: u8,

    /// Cycles between leak applications (4 bits)
    pub leak_cycles: U4,

    /// Loader handshake; the core holds while this is low
    pub params_ready: bool,
}

impl AlifParameters {
    /// Parameters with `params_ready` asserted
    pub const fn ready(weight_a: U3, leak_rate: u8, threshold_min: u8, leak_cycles: U4) -> Self {
        Self {
            weight_a,
            leak_rate,
            threshold_min,
            leak_cycles,
            params_ready: true,
        }
    }

    /// Upper bound of the adaptive threshold, see [`threshold_max`]
    #[inline]
    pub const fn threshold_max(&self) -> u8 {
        threshold_max(self.threshold_min)
    }
}

impl Default for AlifParameters {
    fn default() -> Self {
        Self {
            weight_a: U3::new_wrapping(1),
            leak_rate: 1,
            threshold_min: 10,
            leak_cycles: U4::MAX,
            params_ready: false, // loader has not handed over yet
        }
    }
}

/// Which branch of the clock edge produced the next state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum TransitionKind {
    Reset,
    /// Disabled or parameters not ready
    Hold,
    Refractory,
    Fire,
    Integrate,
    /// Enabled, not refractory, input gated off
    Idle,
}

/// Compute the register file after one clock edge and the branch taken
pub fn transition(
    state: &NeuronState,
    params: &AlifParameters,
    inputs: &CycleInputs,
) -> (TransitionKind, NeuronState) {
    if inputs.reset {
        return (TransitionKind::Reset, NeuronState::reset(params.threshold_min));
    }

    if !(inputs.enable && params.params_ready) {
        return (TransitionKind::Hold, hold(state));
    }

    let apply_leak = leak_due(state.leak_counter, params.leak_cycles);
    let leak_counter = next_leak_counter(state.leak_counter, apply_leak);

    if state.is_refractory() {
        return (TransitionKind::Refractory, refractory(state, leak_counter));
    }

    if !inputs.input_enable {
        return (TransitionKind::Idle, idle(state, leak_counter));
    }

    integrate_and_fire(state, params, inputs, apply_leak, leak_counter)
}

/// One clock edge: `(state, params, inputs) → (state', outputs)`
///
/// Total and deterministic. The returned outputs are the pins after the edge:
/// `spike_out` is the flop just written and `v_mem_out` reads the new `v_mem`.
///
/// # Example
/// ```
/// use alif_npu_neural::{step, AlifParameters, CycleInputs, NeuronState, U3, U4, U6};
///
/// let params = AlifParameters::ready(U3::new_wrapping(3), 0, 10, U4::new_wrapping(15));
/// let state = NeuronState { v_mem: 9, ..NeuronState::reset(10) };
///
/// let (next, out) = step(&state, &params, &CycleInputs::drive(U6::new_wrapping(2)));
/// assert!(out.spike_out);
/// assert_eq!(next.v_mem, 0);
/// assert_eq!(next.threshold, 14);
/// ```
#[inline]
pub fn step(
    state: &NeuronState,
    params: &AlifParameters,
    inputs: &CycleInputs,
) -> (NeuronState, CycleOutputs) {
    let (_, next) = transition(state, params, inputs);
    (next, next.outputs())
}

fn hold(state: &NeuronState) -> NeuronState {
    NeuronState {
        spike_out: false,
        ..*state
    }
}

fn refractory(state: &NeuronState, leak_counter: U4) -> NeuronState {
    NeuronState {
        refr_cnt: state.refr_cnt.wrapping_sub(1),
        leak_counter,
        spike_out: false,
        ..*state
    }
}

fn idle(state: &NeuronState, leak_counter: U4) -> NeuronState {
    NeuronState {
        leak_counter,
        spike_out: false,
        ..*state
    }
}

fn integrate_and_fire(
    state: &NeuronState,
    params: &AlifParameters,
    inputs: &CycleInputs,
    apply_leak: bool,
    leak_counter: U4,
) -> (TransitionKind, NeuronState) {
    let sum = weighted_sum(inputs.chan_a, params.weight_a);
    let new_v = integrate(state.v_mem, sum, apply_leak.then_some(params.leak_rate));

    if new_v >= state.threshold {
        let next = NeuronState {
            v_mem: 0,
            threshold: raise_threshold(state.threshold, params.threshold_max()),
            refr_cnt: REFRACTORY_CYCLES,
            leak_counter,
            spike_out: true,
        };
        return (TransitionKind::Fire, next);
    }

    // Threshold only decays on leak cycles
    let threshold = if apply_leak {
        decay_threshold(state.threshold, params.threshold_min)
    } else {
        state.threshold
    };

    let next = NeuronState {
        v_mem: new_v,
        threshold,
        refr_cnt: state.refr_cnt,
        leak_counter,
        spike_out: false,
    };
    (TransitionKind::Integrate, next)
}

/// A single neuron: register file plus the clock-edge function
///
/// The core never owns its parameters; the loader supplies them on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct NeuronCore {
    state: NeuronState,
}

impl NeuronCore {
    /// Core in its post-reset state
    pub const fn new(threshold_min: u8) -> Self {
        Self {
            state: NeuronState::reset(threshold_min),
        }
    }

    /// Core with preloaded registers
    pub const fn from_state(state: NeuronState) -> Self {
        Self { state }
    }

    #[inline]
    pub const fn state(&self) -> &NeuronState {
        &self.state
    }

    /// Pins visible before the next edge
    #[inline]
    pub fn outputs(&self) -> CycleOutputs {
        self.state.outputs()
    }

    /// Advance one clock edge
    #[inline]
    pub fn clock(&mut self, params: &AlifParameters, inputs: &CycleInputs) -> CycleOutputs {
        self.clock_with_kind(params, inputs).1
    }

    /// Advance one clock edge and report the branch taken
    pub fn clock_with_kind(
        &mut self,
        params: &AlifParameters,
        inputs: &CycleInputs,
    ) -> (TransitionKind, CycleOutputs) {
        let (kind, next) = transition(&self.state, params, inputs);
        self.state = next;
        (kind, next.outputs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::U6;

    fn params(weight: u32, leak_rate: u8, threshold_min: u8, leak_cycles: u32) -> AlifParameters {
        AlifParameters::ready(
            U3::new_wrapping(weight),
            leak_rate,
            threshold_min,
            U4::new_wrapping(leak_cycles),
        )
    }

    fn drive(chan_a: u32) -> CycleInputs {
        CycleInputs::drive(U6::new_wrapping(chan_a))
    }

    #[test]
    fn test_reset_dominates_every_other_input() {
        let p = params(7, 3, 12, 0);
        let state = NeuronState {
            v_mem: 200,
            threshold: 20,
            refr_cnt: U4::new_wrapping(3),
            leak_counter: U4::new_wrapping(9),
            spike_out: true,
        };
        let inputs = CycleInputs {
            reset: true,
            ..drive(63)
        };

        let (kind, next) = transition(&state, &p, &inputs);
        assert_eq!(kind, TransitionKind::Reset);
        assert_eq!(next, NeuronState::reset(12));
    }

    #[test]
    fn test_reset_ignores_params_ready() {
        let p = AlifParameters {
            params_ready: false,
            ..params(1, 1, 33, 1)
        };
        let state = NeuronState {
            v_mem: 5,
            ..NeuronState::reset(10)
        };
        let (next, out) = step(&state, &p, &CycleInputs::reset());
        assert_eq!(next.threshold, 33);
        assert_eq!(next.v_mem, 0);
        assert!(!out.spike_out);
    }

    #[test]
    fn test_hold_when_params_not_ready() {
        let p = AlifParameters {
            params_ready: false,
            ..params(7, 0, 1, 0)
        };
        let state = NeuronState {
            v_mem: 40,
            threshold: 2,
            refr_cnt: U4::new_wrapping(2),
            leak_counter: U4::new_wrapping(5),
            spike_out: true,
        };

        let (kind, next) = transition(&state, &p, &drive(63));
        assert_eq!(kind, TransitionKind::Hold);
        assert_eq!(next.v_mem, 40);
        assert_eq!(next.threshold, 2);
        assert_eq!(next.refr_cnt.get(), 2);
        assert_eq!(next.leak_counter.get(), 5); // does not advance
        assert!(!next.spike_out);
    }

    #[test]
    fn test_hold_when_disabled() {
        let p = params(7, 0, 1, 0);
        let state = NeuronState {
            v_mem: 40,
            leak_counter: U4::new_wrapping(5),
            ..NeuronState::reset(1)
        };
        let (kind, next) = transition(&state, &p, &CycleInputs::disabled());
        assert_eq!(kind, TransitionKind::Hold);
        assert_eq!(next.leak_counter.get(), 5);
        assert_eq!(next.v_mem, 40);
    }

    #[test]
    fn test_refractory_counts_down_and_leak_counter_runs() {
        let p = params(7, 50, 10, 15);
        let state = NeuronState {
            v_mem: 0,
            threshold: 14,
            refr_cnt: U4::new_wrapping(4),
            leak_counter: U4::new_wrapping(3),
            spike_out: true,
        };

        let (kind, next) = transition(&state, &p, &drive(63));
        assert_eq!(kind, TransitionKind::Refractory);
        assert_eq!(next.refr_cnt.get(), 3);
        assert_eq!(next.leak_counter.get(), 4);
        assert_eq!(next.v_mem, 0);
        assert_eq!(next.threshold, 14);
        assert!(!next.spike_out);
    }

    #[test]
    fn test_refractory_leak_cycle_leaves_threshold_alone() {
        let p = params(1, 50, 10, 0);
        let state = NeuronState {
            v_mem: 30,
            threshold: 14,
            refr_cnt: U4::new_wrapping(1),
            ..NeuronState::reset(10)
        };
        let (next, _) = step(&state, &p, &drive(1));
        assert_eq!(next.threshold, 14);
        assert_eq!(next.v_mem, 30);
        assert_eq!(next.leak_counter.get(), 0);
        assert_eq!(next.refr_cnt.get(), 0);
    }

    #[test]
    fn test_idle_holds_membrane_but_advances_leak_counter() {
        let p = params(7, 50, 10, 2);
        let state = NeuronState {
            v_mem: 8,
            threshold: 12,
            leak_counter: U4::new_wrapping(2),
            ..NeuronState::reset(10)
        };
        let (kind, next) = transition(&state, &p, &CycleInputs::idle());
        assert_eq!(kind, TransitionKind::Idle);
        assert_eq!(next.v_mem, 8);
        assert_eq!(next.threshold, 12); // no decay without input
        assert_eq!(next.leak_counter.get(), 0);
    }

    #[test]
    fn test_integration_fires_and_adapts_threshold() {
        let p = params(3, 0, 10, 15);
        let state = NeuronState {
            v_mem: 9,
            ..NeuronState::reset(10)
        };

        let (kind, next) = transition(&state, &p, &drive(2));
        assert_eq!(kind, TransitionKind::Fire);
        assert_eq!(next.v_mem, 0);
        assert_eq!(next.refr_cnt.get(), 4);
        assert_eq!(next.threshold, 14);
        assert!(next.spike_out);
    }

    #[test]
    fn test_sub_threshold_integration_decays_threshold_only_on_leak() {
        let p = params(1, 2, 10, 1);
        let state = NeuronState {
            v_mem: 3,
            threshold: 14,
            leak_counter: U4::new_wrapping(0),
            ..NeuronState::reset(10)
        };

        // counter 0 < 1: no leak
        let (kind, s1) = transition(&state, &p, &drive(1));
        assert_eq!(kind, TransitionKind::Integrate);
        assert_eq!(s1.v_mem, 4);
        assert_eq!(s1.threshold, 14);
        assert_eq!(s1.leak_counter.get(), 1);

        // counter 1 >= 1: leak
        let (_, s2) = transition(&s1, &p, &drive(1));
        assert_eq!(s2.v_mem, 3); // 4 + 1 - 2
        assert_eq!(s2.threshold, 13);
        assert_eq!(s2.leak_counter.get(), 0);
    }

    #[test]
    fn test_leak_applies_before_spike_test() {
        // 9 + 6 - 6 = 9 < 10: the leak cancels what would have been a spike
        let p = params(3, 6, 10, 0);
        let state = NeuronState {
            v_mem: 9,
            ..NeuronState::reset(10)
        };
        let (kind, next) = transition(&state, &p, &drive(2));
        assert_eq!(kind, TransitionKind::Integrate);
        assert_eq!(next.v_mem, 9);
        assert_eq!(next.threshold, 10);
    }

    #[test]
    fn test_weighted_sum_wrap_reaches_membrane() {
        let p = params(7, 0, 255, 15);
        let state = NeuronState {
            v_mem: 100,
            threshold: 255,
            ..NeuronState::reset(255)
        };
        let (next, out) = step(&state, &p, &drive(63));
        assert_eq!(next.v_mem, 29); // 100 + (-71)
        assert_eq!(out.v_mem_out.get(), 29);
    }

    #[test]
    fn test_wrapped_threshold_max_clamps_threshold_down() {
        // threshold_min = 200 gives threshold_max = 144
        let p = params(7, 0, 200, 15);
        let state = NeuronState {
            v_mem: 199,
            threshold: 200,
            ..NeuronState::reset(200)
        };
        let (next, _) = step(&state, &p, &drive(1));
        assert!(next.spike_out);
        assert_eq!(next.threshold, 144);
    }

    #[test]
    fn test_core_clock_updates_registers() {
        let p = params(3, 0, 10, 15);
        let mut core = NeuronCore::from_state(NeuronState {
            v_mem: 9,
            ..NeuronState::reset(10)
        });

        assert!(!core.outputs().spike_out);
        let (kind, out) = core.clock_with_kind(&p, &drive(2));
        assert_eq!(kind, TransitionKind::Fire);
        assert!(out.spike_out);
        assert_eq!(core.outputs(), out);

        let out = core.clock(&p, &drive(2));
        assert!(!out.spike_out);
        assert_eq!(core.state().refr_cnt.get(), 3);
    }

    #[test]
    fn test_default_parameters_are_not_ready() {
        let p = AlifParameters::default();
        assert!(!p.params_ready);
        assert_eq!(p.threshold_max(), 20);
    }
}
