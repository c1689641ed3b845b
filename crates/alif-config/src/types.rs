// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `alif_configuration.toml`. Neuron fields are read as plain integers so that
//! an out-of-range value reaches validation with a useful message instead of
//! failing inside the TOML parser.

use std::path::PathBuf;

use alif_npu_neural::{AlifParameters, CycleInputs, UInt, U3, U4, U6};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AlifConfig {
    pub neuron: NeuronConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

/// Neuron parameters handed to the core
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuronConfig {
    /// 3 bits
    pub weight_a: u32,
    /// 8 bits
    pub leak_rate: u32,
    /// 8 bits
    pub threshold_min: u32,
    /// 4 bits
    pub leak_cycles: u32,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            weight_a: 3,
            leak_rate: 1,
            threshold_min: 10,
            leak_cycles: 15,
        }
    }
}

/// Default drive used when no stimulus file is given
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub cycles: u32,
    pub enable: bool,
    pub input_enable: bool,
    /// 6 bits
    pub chan_a: u32,
    pub trace_output: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cycles: 100,
            enable: true,
            input_enable: true,
            chan_a: 2,
            trace_output: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    pub level: String,
    /// text or json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

fn fixed<const BITS: u32>(field: &str, value: u32) -> ConfigResult<UInt<BITS>> {
    UInt::<BITS>::try_new(value).map_err(|e| ConfigError::InvalidValue(format!("{}: {}", field, e)))
}

fn byte(field: &str, value: u32) -> ConfigResult<u8> {
    u8::try_from(value).map_err(|_| {
        ConfigError::InvalidValue(format!("{}: Value {} does not fit in 8 bits", field, value))
    })
}

impl AlifConfig {
    /// Range-checked core parameters with `params_ready` asserted
    pub fn neuron_parameters(&self) -> ConfigResult<AlifParameters> {
        let n = &self.neuron;
        let weight_a: U3 = fixed("neuron.weight_a", n.weight_a)?;
        let leak_cycles: U4 = fixed("neuron.leak_cycles", n.leak_cycles)?;
        Ok(AlifParameters::ready(
            weight_a,
            byte("neuron.leak_rate", n.leak_rate)?,
            byte("neuron.threshold_min", n.threshold_min)?,
            leak_cycles,
        ))
    }

    /// Input record applied on every edge of a default run
    pub fn default_inputs(&self) -> ConfigResult<CycleInputs> {
        let s = &self.simulation;
        let chan_a: U6 = fixed("simulation.chan_a", s.chan_a)?;
        Ok(CycleInputs {
            reset: false,
            enable: s.enable,
            input_enable: s.input_enable,
            chan_a,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let config: AlifConfig = toml::from_str(
            r#"
            [neuron]
            weight_a = 5
            leak_cycles = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.neuron.weight_a, 5);
        assert_eq!(config.neuron.leak_cycles, 3);
        assert_eq!(config.neuron.threshold_min, 10);
        assert_eq!(config.simulation, SimulationConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_neuron_parameters_conversion() {
        let mut config = AlifConfig::default();
        config.neuron.leak_rate = 255;
        let params = config.neuron_parameters().unwrap();
        assert_eq!(params.weight_a.get(), 3);
        assert_eq!(params.leak_rate, 255);
        assert_eq!(params.leak_cycles.get(), 15);
        assert!(params.params_ready);
    }

    #[test]
    fn test_neuron_parameters_reject_wide_values() {
        let mut config = AlifConfig::default();
        config.neuron.weight_a = 8;
        let err = config.neuron_parameters().unwrap_err();
        assert!(err.to_string().contains("neuron.weight_a"));

        let mut config = AlifConfig::default();
        config.neuron.threshold_min = 256;
        assert!(matches!(
            config.neuron_parameters(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_default_inputs_from_simulation_section() {
        let mut config = AlifConfig::default();
        config.simulation.input_enable = false;
        config.simulation.chan_a = 63;
        let inputs = config.default_inputs().unwrap();
        assert!(inputs.enable);
        assert!(!inputs.input_enable);
        assert_eq!(inputs.chan_a.get(), 63);

        config.simulation.chan_a = 64;
        assert!(config.default_inputs().is_err());
    }
}
