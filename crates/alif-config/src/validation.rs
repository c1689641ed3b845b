// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that every neuron field fits its register width and that the
//! simulation and logging sections are usable. All violations are collected
//! and reported together.

use crate::{AlifConfig, ConfigError, ConfigResult};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    BitWidth { field: String, value: u32, bits: u32 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BitWidth { field, value, bits } => {
                write!(
                    f,
                    "{} = {} does not fit in {} bits (0-{})",
                    field,
                    value,
                    bits,
                    (1u32 << bits) - 1
                )
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Neuron and input fields within their register widths
/// - Non-zero run length
/// - Known log level and format
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &AlifConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_bit_widths(config, &mut errors);
    validate_simulation(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn check_width(field: &str, value: u32, bits: u32, errors: &mut Vec<ConfigValidationError>) {
    if value >= (1u32 << bits) {
        errors.push(ConfigValidationError::BitWidth {
            field: field.to_string(),
            value,
            bits,
        });
    }
}

fn validate_bit_widths(config: &AlifConfig, errors: &mut Vec<ConfigValidationError>) {
    let n = &config.neuron;
    check_width("neuron.weight_a", n.weight_a, 3, errors);
    check_width("neuron.leak_rate", n.leak_rate, 8, errors);
    check_width("neuron.threshold_min", n.threshold_min, 8, errors);
    check_width("neuron.leak_cycles", n.leak_cycles, 4, errors);
    check_width("simulation.chan_a", config.simulation.chan_a, 6, errors);
}

fn validate_simulation(config: &AlifConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.simulation.cycles == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "simulation.cycles".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
}

fn validate_logging(config: &AlifConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }
    let format = config.logging.format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
        });
    }
}

/// Non-fatal notes for parameters that exercise the circuit's fixed-width quirks
///
/// These configurations are legal and simulated bit-exactly, but they behave
/// differently from the idealised model.
pub fn fixed_width_advisories(config: &AlifConfig) -> Vec<String> {
    let n = &config.neuron;
    let mut notes = Vec::new();

    if (128..=255).contains(&n.threshold_min) {
        notes.push(format!(
            "neuron.threshold_min = {} wraps threshold_max to {} (8-bit shift); \
             the threshold can end up below threshold_min after a spike",
            n.threshold_min,
            (n.threshold_min << 1) & 0xFF
        ));
    }

    // 63 * weight_a leaves the 9-bit signed range once weight_a >= 5
    if (5..=7).contains(&n.weight_a) {
        notes.push(format!(
            "neuron.weight_a = {}: chan_a above {} makes chan_a * weight_a wrap negative (9-bit signed)",
            n.weight_a,
            255 / n.weight_a
        ));
    }

    notes
}
