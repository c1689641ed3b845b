// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-alif-npu-runtime` to raise one crate to
//! `debug` while the rest stay at the configured level.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Crates whose log level is raised to `debug`
///
/// # Example
/// ```rust
/// use alif_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-alif-npu-runtime".to_string()]);
/// assert!(flags.is_enabled("alif-npu-runtime"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Looks for arguments matching `--debug-{crate-name}`; `--debug-all`
    /// enables every entry of [`KNOWN_CRATES`]. Other arguments are ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();

        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }

        flags
    }

    /// Merge a comma-separated list (`ALIF_DEBUG` format); `all` enables every known crate
    pub fn extend_from_list(&mut self, list: &str) {
        if list.trim() == "all" {
            self.enable_all();
            return;
        }
        for crate_name in list.split(',') {
            let crate_name = crate_name.trim();
            if !crate_name.is_empty() {
                self.enable(crate_name);
            }
        }
    }

    fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string());
    }

    fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Build an `EnvFilter` directive string
    ///
    /// Crate names are turned into tracing targets (`-` becomes `_`).
    /// Format: `"info,alif_npu_runtime=debug"`, or just `base_level` if no
    /// crate is enabled.
    pub fn to_filter_string(&self, base_level: &str) -> String {
        let mut filters = vec![base_level.to_lowercase()];
        for crate_name in &self.enabled_crates {
            filters.push(format!("{}=debug", crate_name.replace('-', "_")));
        }
        filters.join(",")
    }
}

/// Debug flags from the process arguments and the `ALIF_DEBUG` environment variable
///
/// `ALIF_DEBUG` format: comma-separated crate names, e.g. `alif-npu-runtime,alif-testbench`,
/// or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(list) = env::var("ALIF_DEBUG") {
        flags.extend_from_list(&list);
    }
    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  ALIF_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  ALIF_DEBUG=all                              Enable debug for all crates
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec![
            "--config".to_string(),
            "--debug-alif-npu-runtime".to_string(),
        ]);
        assert!(flags.is_enabled("alif-npu-runtime"));
        assert!(!flags.is_enabled("alif-testbench"));
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_env_list_merges() {
        let mut flags = CrateDebugFlags::from_args(vec!["--debug-alif-testbench".to_string()]);
        flags.extend_from_list(" alif-npu-runtime, ,");
        assert_eq!(flags.enabled_crates.len(), 2);

        let mut flags = CrateDebugFlags::default();
        flags.extend_from_list("all");
        assert_eq!(flags.enabled_crates.len(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_filter_string_uses_targets() {
        assert_eq!(CrateDebugFlags::default().to_filter_string("WARN"), "warn");

        let flags = CrateDebugFlags::from_args(vec!["--debug-alif-npu-runtime".to_string()]);
        assert_eq!(flags.to_filter_string("info"), "info,alif_npu_runtime=debug");
    }
}
