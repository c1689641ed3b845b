// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the ALIF tools
//!
//! Installs a console layer (text or JSON) and, with the `file-logging`
//! feature, a JSON log file per run:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── alif.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Keeps file writers alive; logs are flushed on drop
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run directory receiving log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// `EnvFilter` for the configured level plus per-crate debug flags
pub fn build_filter(debug_flags: &CrateDebugFlags, level: &str) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter directives: {}", directives))
}

fn console_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer {
    match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(filter)
            .boxed(),
    }
}

/// Initialize the global subscriber
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags raised on top of `config.level`
/// * `config` - Level, console format and optional log directory
///
/// # Errors
/// Fails on an invalid level, on an unwritable log directory, or when a
/// global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    #[cfg_attr(not(feature = "file-logging"), allow(unused_mut))]
    let mut layers = vec![console_layer(
        config.format,
        build_filter(debug_flags, &config.level)?,
    )];

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = match &config.log_dir {
        Some(base) => {
            let (layer, guard, run_folder) = file::file_layer(base, debug_flags, config)?;
            layers.push(layer);
            (vec![guard], Some(run_folder))
        }
        None => (Vec::new(), None),
    };
    #[cfg(not(feature = "file-logging"))]
    let log_dir: Option<PathBuf> = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    #[cfg(not(feature = "file-logging"))]
    {
        if let Some(dir) = &config.log_dir {
            tracing::warn!(
                log_dir = %dir.display(),
                "log_dir ignored: built without the file-logging feature"
            );
        }
    }

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

/// Initialize console logging at `info`
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LoggingConfig::default())
}

/// Directory name for a run started at `started`: `run_YYYYmmdd_HHMMSS`
pub fn run_folder_name(started: DateTime<Utc>) -> String {
    format!("{}{}", RUN_PREFIX, started.format(RUN_TIMESTAMP))
}

/// Delete all but the `keep` most recent run directories under `base_log_dir`
///
/// Entries whose name does not parse as a run timestamp are left alone.
/// Returns the removed directories, oldest first.
pub fn prune_run_directories(base_log_dir: &Path, keep: usize) -> Result<Vec<PathBuf>> {
    if !base_log_dir.exists() {
        return Ok(Vec::new());
    }

    let mut runs: Vec<(NaiveDateTime, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let started = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
            .and_then(|ts| NaiveDateTime::parse_from_str(ts, RUN_TIMESTAMP).ok());
        if let Some(started) = started {
            runs.push((started, path));
        }
    }

    runs.sort();
    let excess = runs.len().saturating_sub(keep);
    let mut removed = Vec::with_capacity(excess);
    for (_, path) in runs.into_iter().take(excess) {
        std::fs::remove_dir_all(&path)
            .with_context(|| format!("Failed to remove old log directory {}", path.display()))?;
        removed.push(path);
    }
    Ok(removed)
}

#[cfg(feature = "file-logging")]
mod file {
    use super::*;
    use tracing_appender::non_blocking::WorkerGuard;

    pub(super) fn file_layer(
        base_log_dir: &Path,
        debug_flags: &CrateDebugFlags,
        config: &LoggingConfig,
    ) -> Result<(BoxedLayer, WorkerGuard, PathBuf)> {
        let run_folder = base_log_dir.join(run_folder_name(Utc::now()));
        std::fs::create_dir_all(&run_folder).with_context(|| {
            format!("Failed to create log directory: {}", run_folder.display())
        })?;
        prune_run_directories(base_log_dir, config.retention_runs.max(1))?;

        let appender = tracing_appender::rolling::never(&run_folder, "alif.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(build_filter(debug_flags, &config.level)?)
            .boxed();

        Ok((layer, guard, run_folder))
    }
}
