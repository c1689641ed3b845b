// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Neural dynamics primitives for the ALIF neuron
//!
//! Pure functions over fixed-width values. Each one reproduces a single
//! datapath element of the circuit, including its truncation behaviour.
//! Platform-agnostic, works with `no_std`.

use crate::types::{S9, U3, U4, U6, U7};

/// Fixed refractory length loaded into `refr_cnt` on a spike
pub const REFRACTORY_CYCLES: U4 = U4::new_wrapping(4);

/// Threshold increment applied on every spike
pub const THRESHOLD_STEP_UP: u16 = 4;

/// Upper bound of the adaptive threshold
///
/// The hardware computes `threshold_min << 1` into an 8-bit wire, so the top
/// bit is lost for `threshold_min >= 128`.
///
/// # Example
/// ```
/// use alif_npu_neural::threshold_max;
///
/// assert_eq!(threshold_max(10), 20);
/// assert_eq!(threshold_max(200), 144); // 400 mod 256
/// ```
#[inline]
pub const fn threshold_max(threshold_min: u8) -> u8 {
    threshold_min.wrapping_shl(1)
}

/// 7-bit `v_mem_out` readout
///
/// Takes the low 7 bits of a positive membrane potential. Values in
/// [128, 255] are truncated, not saturated.
#[inline]
pub const fn membrane_readout(v_mem: u8) -> U7 {
    if v_mem > 0 {
        U7::new_wrapping(v_mem as u32)
    } else {
        U7::ZERO
    }
}

/// Leak is due when the pre-cycle counter has reached `leak_cycles`
#[inline]
pub const fn leak_due(leak_counter: U4, leak_cycles: U4) -> bool {
    leak_counter.get() >= leak_cycles.get()
}

/// Next leak counter value
///
/// Both assignments happen on the same edge; the clear issued by a leak cycle
/// is the later one and wins over the increment.
#[inline]
pub const fn next_leak_counter(leak_counter: U4, apply_leak: bool) -> U4 {
    let incremented = leak_counter.wrapping_add(1);
    if apply_leak {
        U4::ZERO
    } else {
        incremented
    }
}

/// `chan_a * weight_a` on a 9-bit signed wire
///
/// Products above 255 wrap into the negative half (e.g. 63 * 7 = 441 → -71).
#[inline]
pub const fn weighted_sum(chan_a: U6, weight_a: U3) -> S9 {
    S9::new_wrapping(chan_a.get() as i32 * weight_a.get() as i32)
}

/// Integrate one cycle of input into the membrane potential
///
/// `leak` is the charge removed on a leak cycle. The result is clamped to
/// [0, 255].
#[inline]
pub fn integrate(v_mem: u8, weighted_sum: S9, leak: Option<u8>) -> u8 {
    let mut new_v = v_mem as i32 + weighted_sum.get() as i32;
    if let Some(leak_rate) = leak {
        new_v -= leak_rate as i32;
    }
    new_v.clamp(0, u8::MAX as i32) as u8
}

/// Threshold after a spike: `min(threshold + 4, threshold_max)`
#[inline]
pub fn raise_threshold(threshold: u8, threshold_max: u8) -> u8 {
    (threshold as u16 + THRESHOLD_STEP_UP).min(threshold_max as u16) as u8
}

/// Threshold after a silent leak cycle: `max(threshold - 1, threshold_min)`
#[inline]
pub fn decay_threshold(threshold: u8, threshold_min: u8) -> u8 {
    (threshold as i16 - 1).max(threshold_min as i16) as u8
}
