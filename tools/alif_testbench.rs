// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Single-neuron testbench.
//!
//! Loads `alif_configuration.toml`, drives one core through a stimulus
//! program (or a constant drive built from the `[simulation]` section) and
//! writes the per-cycle trace as JSON. The run summary goes to stdout.
//! Exit code 2 on usage, configuration or stimulus errors, 1 if the trace
//! cannot be written.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;

use alif::config::{fixed_width_advisories, load_config, validate_config, AlifConfig};
use alif::observability::{debug_flags_help, init_logging, parse_debug_flags, LoggingConfig};
use alif::runtime::{CycleDriver, Stimulus};
use tracing::{error, info, warn};

struct Args {
    config: Option<PathBuf>,
    stimulus: Option<PathBuf>,
    output: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    overrides: HashMap<String, String>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: alif_testbench [--config <path>] [--stimulus <path>] [--output <path>]\n\
         \x20                     [--log-dir <path>] [--set <key>=<value>]... [--debug-all | --debug-<crate>]\n\n\
         Defaults:\n\
         - config: ALIF_CONFIG_PATH, else alif_configuration.toml in this or a parent directory\n\
         - stimulus: constant drive of simulation.cycles edges from the [simulation] section\n\
         - output: simulation.trace_output (no trace file if unset)\n\n\
         Override keys for --set: weight_a, leak_rate, threshold_min, leak_cycles, cycles,\n\
         chan_a, input_enable, trace_output, log_level, log_format\n\n\
         {}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        stimulus: None,
        output: None,
        log_dir: None,
        overrides: HashMap::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.config = Some(PathBuf::from(v));
            }
            "--stimulus" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.stimulus = Some(PathBuf::from(v));
            }
            "--output" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.output = Some(PathBuf::from(v));
            }
            "--log-dir" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.log_dir = Some(PathBuf::from(v));
            }
            "--set" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                let Some((key, value)) = v.split_once('=') else {
                    eprintln!("--set expects <key>=<value>, got: {v}");
                    usage_and_exit();
                };
                parsed
                    .overrides
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
            "-h" | "--help" => usage_and_exit(),
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    parsed
}

fn load_validated_config(args: &Args) -> AlifConfig {
    let config = load_config(args.config.as_deref(), Some(&args.overrides)).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(2);
    });
    if let Err(e) = validate_config(&config) {
        eprintln!("{e}");
        process::exit(2);
    }
    config
}

fn main() {
    let args = parse_args();
    let config = load_validated_config(&args);

    let mut logging = LoggingConfig::from_parts(&config.logging.level, &config.logging.format)
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(2);
        });
    logging.log_dir = args.log_dir.clone();
    let _guard = init_logging(&parse_debug_flags(), &logging).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logging: {e:#}");
        process::exit(2);
    });

    for note in fixed_width_advisories(&config) {
        warn!("{}", note);
    }

    let params = config.neuron_parameters().unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(2);
    });

    let stimulus = match &args.stimulus {
        Some(path) => Stimulus::load(path).unwrap_or_else(|e| {
            error!(path = %path.display(), "Failed to load stimulus: {}", e);
            process::exit(2);
        }),
        None => {
            let inputs = config.default_inputs().unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(2);
            });
            Stimulus::constant(inputs, config.simulation.cycles).named("constant drive")
        }
    };

    info!(
        weight_a = params.weight_a.get(),
        leak_rate = params.leak_rate,
        threshold_min = params.threshold_min,
        threshold_max = params.threshold_max(),
        leak_cycles = params.leak_cycles.get(),
        "parameters loaded"
    );

    let mut driver = CycleDriver::new(params);
    let trace = driver.run(&stimulus);

    let output = args.output.or(config.simulation.trace_output);
    if let Some(path) = output {
        if let Err(e) = trace.write_json(&path) {
            error!(path = %path.display(), "Failed to write trace: {}", e);
            process::exit(1);
        }
        info!(path = %path.display(), records = trace.len(), "trace written");
    }

    match serde_json::to_string_pretty(&trace.summary()) {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            error!("Failed to serialize summary: {}", e);
            process::exit(1);
        }
    }
}
