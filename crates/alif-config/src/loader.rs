// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{AlifConfig, ConfigError, ConfigResult, CONFIG_FILE_NAME};

/// Find the ALIF configuration file
///
/// Search order:
/// 1. `ALIF_CONFIG_PATH` environment variable
/// 2. Current working directory: `./alif_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("ALIF_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by ALIF_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet ALIF_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// Validation is left to [`crate::validate_config`] so callers can report
/// every violation at once.
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<AlifConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: AlifConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

fn parse_bool(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `ALIF_WEIGHT_A` -> `neuron.weight_a`
/// - `ALIF_LEAK_RATE` -> `neuron.leak_rate`
/// - `ALIF_THRESHOLD_MIN` -> `neuron.threshold_min`
/// - `ALIF_LEAK_CYCLES` -> `neuron.leak_cycles`
/// - `ALIF_CYCLES` -> `simulation.cycles`
/// - `ALIF_CHAN_A` -> `simulation.chan_a`
/// - `ALIF_INPUT_ENABLE` -> `simulation.input_enable`
/// - `ALIF_TRACE_OUTPUT` -> `simulation.trace_output`
/// - `ALIF_LOG_LEVEL` -> `logging.level`
/// - `ALIF_LOG_FORMAT` -> `logging.format`
///
/// Unparseable numeric values are ignored, as with a missing variable.
pub fn apply_environment_overrides(config: &mut AlifConfig) {
    let numeric = |name: &str| env::var(name).ok().and_then(|v| v.trim().parse::<u32>().ok());

    if let Some(value) = numeric("ALIF_WEIGHT_A") {
        config.neuron.weight_a = value;
    }
    if let Some(value) = numeric("ALIF_LEAK_RATE") {
        config.neuron.leak_rate = value;
    }
    if let Some(value) = numeric("ALIF_THRESHOLD_MIN") {
        config.neuron.threshold_min = value;
    }
    if let Some(value) = numeric("ALIF_LEAK_CYCLES") {
        config.neuron.leak_cycles = value;
    }
    if let Some(value) = numeric("ALIF_CYCLES") {
        config.simulation.cycles = value;
    }
    if let Some(value) = numeric("ALIF_CHAN_A") {
        config.simulation.chan_a = value;
    }
    if let Ok(value) = env::var("ALIF_INPUT_ENABLE") {
        config.simulation.input_enable = parse_bool(&value);
    }
    if let Ok(value) = env::var("ALIF_TRACE_OUTPUT") {
        config.simulation.trace_output = Some(PathBuf::from(value));
    }
    if let Ok(value) = env::var("ALIF_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("ALIF_LOG_FORMAT") {
        config.logging.format = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// Keys: `weight_a`, `leak_rate`, `threshold_min`, `leak_cycles`, `cycles`,
/// `chan_a`, `input_enable`, `trace_output`, `log_level`, `log_format`.
///
/// # Errors
///
/// Unlike environment overrides, an explicit CLI value that does not parse is
/// reported as `ConfigError::InvalidValue`.
pub fn apply_cli_overrides(
    config: &mut AlifConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    let numeric = |key: &str| -> ConfigResult<Option<u32>> {
        match cli_args.get(key) {
            Some(value) => value.trim().parse::<u32>().map(Some).map_err(|_| {
                ConfigError::InvalidValue(format!("--{} expects an unsigned integer, got '{}'", key, value))
            }),
            None => Ok(None),
        }
    };

    if let Some(value) = numeric("weight_a")? {
        config.neuron.weight_a = value;
    }
    if let Some(value) = numeric("leak_rate")? {
        config.neuron.leak_rate = value;
    }
    if let Some(value) = numeric("threshold_min")? {
        config.neuron.threshold_min = value;
    }
    if let Some(value) = numeric("leak_cycles")? {
        config.neuron.leak_cycles = value;
    }
    if let Some(value) = numeric("cycles")? {
        config.simulation.cycles = value;
    }
    if let Some(value) = numeric("chan_a")? {
        config.simulation.chan_a = value;
    }
    if let Some(value) = cli_args.get("input_enable") {
        config.simulation.input_enable = parse_bool(value);
    }
    if let Some(value) = cli_args.get("trace_output") {
        config.simulation.trace_output = Some(PathBuf::from(value));
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_format") {
        config.logging.format = value.clone();
    }

    Ok(())
}
