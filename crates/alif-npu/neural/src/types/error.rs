// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the neuron core
//!
//! The per-cycle update never fails. Errors only arise when building
//! fixed-width values from wider integers.

use core::fmt;

#[cfg(feature = "std")]
extern crate std;

/// Error types for ALIF core operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlifError {
    /// Value does not fit in a register of the given width
    BitWidthOverflow { bits: u32, value: u32 },

    /// Value outside the two's-complement range of the given width
    SignedOverflow { bits: u32, value: i32 },
}

impl fmt::Display for AlifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlifError::BitWidthOverflow { bits, value } => {
                write!(f, "Value {} does not fit in {} bits", value, bits)
            }
            AlifError::SignedOverflow { bits, value } => {
                write!(f, "Value {} does not fit in {}-bit two's complement", value, bits)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AlifError {}

pub type Result<T> = core::result::Result<T, AlifError>;
pub type Error = AlifError;
