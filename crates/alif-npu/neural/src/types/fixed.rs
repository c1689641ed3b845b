// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-width register types
//!
//! The circuit stores every register with an explicit bit width and all of its
//! arithmetic is modular in that width. `UInt<BITS>` and `SInt<BITS>` carry the
//! width in the type so that truncation happens where the hardware truncates and
//! nowhere else.
//!
//! ```
//! use alif_npu_neural::types::{S9, U4};
//!
//! // 4-bit counter wraps after 15
//! assert_eq!(U4::new_wrapping(15).wrapping_add(1).get(), 0);
//!
//! // 441 does not fit in 9-bit two's complement: bit 8 becomes the sign
//! assert_eq!(S9::new_wrapping(441).get(), -71);
//! ```

use core::fmt;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use super::error::{AlifError, Result};

/// Unsigned register of `BITS` bits (1..=16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "u16", into = "u16"))]
#[repr(transparent)]
pub struct UInt<const BITS: u32>(u16);

impl<const BITS: u32> UInt<BITS> {
    const MASK: u16 = if BITS >= 16 {
        u16::MAX
    } else {
        (1u16 << BITS) - 1
    };

    /// Register width in bits
    pub const WIDTH: u32 = BITS;
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(Self::MASK);

    /// Keep the low `BITS` bits of `value`
    #[inline]
    pub const fn new_wrapping(value: u32) -> Self {
        Self((value & Self::MASK as u32) as u16)
    }

    /// Range-checked construction
    #[inline]
    pub fn try_new(value: u32) -> Result<Self> {
        if value > Self::MASK as u32 {
            return Err(AlifError::BitWidthOverflow { bits: BITS, value });
        }
        Ok(Self(value as u16))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn wrapping_add(self, rhs: u32) -> Self {
        Self::new_wrapping((self.0 as u32).wrapping_add(rhs))
    }

    #[inline]
    pub const fn wrapping_sub(self, rhs: u32) -> Self {
        // Borrow out of the top bit is dropped by the mask
        Self::new_wrapping((self.0 as u32).wrapping_sub(rhs))
    }
}

impl<const BITS: u32> From<UInt<BITS>> for u16 {
    fn from(value: UInt<BITS>) -> Self {
        value.0
    }
}

impl<const BITS: u32> TryFrom<u16> for UInt<BITS> {
    type Error = AlifError;

    fn try_from(value: u16) -> Result<Self> {
        Self::try_new(value as u32)
    }
}

impl<const BITS: u32> fmt::Display for UInt<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two's-complement signed register of `BITS` bits (2..=16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "i16", into = "i16"))]
#[repr(transparent)]
pub struct SInt<const BITS: u32>(i16);

impl<const BITS: u32> SInt<BITS> {
    pub const WIDTH: u32 = BITS;
    pub const MIN: i16 = -(1i16 << (BITS - 1));
    pub const MAX: i16 = (1i16 << (BITS - 1)) - 1;

    /// Keep the low `BITS` bits of `value` and sign-extend from bit `BITS - 1`
    #[inline]
    pub const fn new_wrapping(value: i32) -> Self {
        let shift = 32 - BITS;
        Self(((value << shift) >> shift) as i16)
    }

    /// Range-checked construction
    #[inline]
    pub fn try_new(value: i32) -> Result<Self> {
        if value < Self::MIN as i32 || value > Self::MAX as i32 {
            return Err(AlifError::SignedOverflow { bits: BITS, value });
        }
        Ok(Self(value as i16))
    }

    #[inline]
    pub const fn get(self) -> i16 {
        self.0
    }
}

impl<const BITS: u32> From<SInt<BITS>> for i16 {
    fn from(value: SInt<BITS>) -> Self {
        value.0
    }
}

impl<const BITS: u32> TryFrom<i16> for SInt<BITS> {
    type Error = AlifError;

    fn try_from(value: i16) -> Result<Self> {
        Self::try_new(value as i32)
    }
}

impl<const BITS: u32> fmt::Display for SInt<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 3-bit synaptic weight
pub type U3 = UInt<3>;
/// 4-bit counters and leak period
pub type U4 = UInt<4>;
/// 6-bit input channel
pub type U6 = UInt<6>;
/// 7-bit membrane readout
pub type U7 = UInt<7>;
/// 9-bit signed weighted input
pub type S9 = SInt<9>;
