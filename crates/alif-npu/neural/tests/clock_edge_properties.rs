// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Property tests for the ALIF clock edge
//!
//! Parameters keep `threshold_min < 128` wherever a property relies on
//! `threshold_max >= threshold_min`; above that the 8-bit shift wraps.

use alif_npu_neural::{
    leak_due, step, transition, AlifParameters, CycleInputs, NeuronState, TransitionKind, U3, U4,
    U6,
};
use proptest::prelude::*;

fn params_strategy() -> impl Strategy<Value = AlifParameters> {
    (0u32..8, any::<u8>(), 0u8..128, 0u32..16).prop_map(|(w, leak_rate, tmin, lc)| {
        AlifParameters::ready(U3::new_wrapping(w), leak_rate, tmin, U4::new_wrapping(lc))
    })
}

fn state_strategy(params: AlifParameters) -> impl Strategy<Value = NeuronState> {
    (
        any::<u8>(),
        params.threshold_min..=params.threshold_max(),
        0u32..=4,
        0u32..16,
        any::<bool>(),
    )
        .prop_map(|(v_mem, threshold, refr, leak, spike_out)| NeuronState {
            v_mem,
            threshold,
            refr_cnt: U4::new_wrapping(refr),
            leak_counter: U4::new_wrapping(leak),
            spike_out,
        })
}

fn inputs_strategy() -> impl Strategy<Value = CycleInputs> {
    (any::<bool>(), any::<bool>(), any::<bool>(), 0u32..64).prop_map(
        |(reset, enable, input_enable, chan_a)| CycleInputs {
            reset,
            enable,
            input_enable,
            chan_a: U6::new_wrapping(chan_a),
        },
    )
}

fn non_reset_inputs_strategy() -> impl Strategy<Value = CycleInputs> {
    inputs_strategy().prop_map(|inputs| CycleInputs {
        reset: false,
        ..inputs
    })
}

fn params_and_state() -> impl Strategy<Value = (AlifParameters, NeuronState)> {
    params_strategy().prop_flat_map(|p| (Just(p), state_strategy(p)))
}

proptest! {
    #[test]
    fn reset_dominates(
        (p, state) in params_and_state(),
        inputs in inputs_strategy(),
        params_ready in any::<bool>(),
    ) {
        let p = AlifParameters { params_ready, ..p };
        let inputs = CycleInputs { reset: true, ..inputs };

        let (next, out) = step(&state, &p, &inputs);
        prop_assert_eq!(next, NeuronState::reset(p.threshold_min));
        prop_assert!(!out.spike_out);
        prop_assert_eq!(out.v_mem_out.get(), 0);
    }

    #[test]
    fn threshold_stays_within_bounds_over_runs(
        (p, state) in params_and_state(),
        program in proptest::collection::vec(inputs_strategy(), 1..96),
    ) {
        let mut state = state;
        for inputs in &program {
            let (next, out) = step(&state, &p, inputs);
            prop_assert!(next.threshold >= p.threshold_min);
            prop_assert!(next.threshold <= p.threshold_max());
            prop_assert!(out.v_mem_out.get() < 128);
            prop_assert!(next.refr_cnt.get() <= 4);
            state = next;
        }
    }

    #[test]
    fn refractory_is_exclusive(
        (p, state) in params_and_state(),
        inputs in non_reset_inputs_strategy(),
        refr in 1u32..=4,
    ) {
        let state = NeuronState { refr_cnt: U4::new_wrapping(refr), ..state };

        let (next, out) = step(&state, &p, &inputs);
        prop_assert!(!out.spike_out);
        prop_assert_eq!(next.v_mem, state.v_mem);
        prop_assert_eq!(next.threshold, state.threshold);
    }

    #[test]
    fn disabled_core_holds_everything_but_spike(
        (p, state) in params_and_state(),
        inputs in non_reset_inputs_strategy(),
    ) {
        let p = AlifParameters { params_ready: false, ..p };

        let (kind, next) = transition(&state, &p, &inputs);
        prop_assert_eq!(kind, TransitionKind::Hold);
        prop_assert_eq!(next, NeuronState { spike_out: false, ..state });
    }

    #[test]
    fn leak_counter_clears_exactly_on_leak_cycles(
        (p, state) in params_and_state(),
        inputs in non_reset_inputs_strategy(),
    ) {
        let inputs = CycleInputs { enable: true, ..inputs };
        let (next, _) = step(&state, &p, &inputs);

        if leak_due(state.leak_counter, p.leak_cycles) {
            prop_assert_eq!(next.leak_counter.get(), 0);
        } else {
            prop_assert_eq!(next.leak_counter, state.leak_counter.wrapping_add(1));
        }
    }

    #[test]
    fn readout_is_low_seven_bits(v_mem in any::<u8>(), p in params_strategy()) {
        let state = NeuronState { v_mem, ..NeuronState::reset(p.threshold_min) };
        prop_assert_eq!(state.outputs().v_mem_out.get(), (v_mem % 128) as u16);
    }
}

#[test]
fn repeated_spikes_saturate_at_threshold_max() {
    let p = AlifParameters::ready(U3::new_wrapping(7), 0, 10, U4::new_wrapping(15));
    let mut state = NeuronState::reset(10);
    let drive = CycleInputs::drive(U6::new_wrapping(36));

    let mut spikes = 0;
    for _ in 0..200 {
        let (next, out) = step(&state, &p, &drive);
        spikes += out.spike_out as u32;
        assert!(next.threshold <= 20);
        state = next;
    }
    assert!(spikes > 10);
    assert_eq!(state.threshold, 20);
}

#[test]
fn silent_leak_cycles_floor_at_threshold_min() {
    let p = AlifParameters::ready(U3::new_wrapping(0), 0, 10, U4::new_wrapping(0));
    let mut state = NeuronState {
        threshold: 20,
        ..NeuronState::reset(10)
    };
    let drive = CycleInputs::drive(U6::new_wrapping(63));

    for _ in 0..40 {
        state = step(&state, &p, &drive).0;
    }
    assert_eq!(state.threshold, 10);
}
