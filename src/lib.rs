// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # ALIF - Adaptive Leaky-Integrate-and-Fire Neuron Core
//!
//! Cycle-accurate, bit-exact model of a synchronous ALIF neuron with a
//! 3-bit input weight, an 8-bit membrane register, an adaptive threshold
//! bounded to `[threshold_min, threshold_max]`, periodic leak and a fixed
//! refractory period. Every register wraps or saturates exactly as the
//! hardware does.
//!
//! ## Feature Flags
//!
//! - **`full`** (default): all components
//! - **`runtime`**: cycle driver, neuron bank, stimulus programs and traces
//! - **`config`**: TOML configuration loader (the parameter loader)
//! - **`observability`**: logging initialisation and per-crate debug flags
//! - **`file-logging`**: per-run JSON log files
//!
//! ## Usage
//!
//! ```rust
//! use alif::prelude::*;
//!
//! let params = AlifParameters::ready(U3::new_wrapping(3), 0, 10, U4::new_wrapping(15));
//! let mut driver = CycleDriver::new(params);
//!
//! let trace = driver.run_for(CycleInputs::drive(U6::new_wrapping(2)), 20);
//! assert_eq!(trace.spike_cycles()[0], 1);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Core: alif-npu-neural                                  │
//! │  (fixed-width registers, clock-edge function, no_std)   │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Runtime: alif-npu-runtime                              │
//! │  (cycle driver, parallel neuron bank, stimulus, trace)  │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: alif-config, alif-observability        │
//! │  (parameter loading, logging)                           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use alif_npu_neural as neural;

// Re-export runtime
#[cfg(feature = "runtime")]
pub use alif_npu_runtime as runtime;

// Re-export infrastructure
#[cfg(feature = "config")]
pub use alif_config as config;

#[cfg(feature = "observability")]
pub use alif_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::neural::{
        AlifParameters, CycleInputs, CycleOutputs, NeuronCore, NeuronState, TransitionKind, U3,
        U4, U6, U7,
    };

    #[cfg(feature = "runtime")]
    pub use crate::runtime::{CycleDriver, NeuronBank, Stimulus, Trace, TraceSummary};

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, validate_config, AlifConfig};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_facade_imports() {
        let core = NeuronCore::new(10);
        assert_eq!(core.state().threshold, 10);
        assert!(!core.outputs().spike_out);
    }
}
