//! Configuration Module
//!
//! Handles loading runner configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Trace runner configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the shared scenario files (kind-specific
    /// subdirectories live beneath it)
    pub trace_dir: PathBuf,
    /// Stop after the first cache kind with a failing scenario
    pub fail_fast: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TRACE_DIR` - Scenario base directory (default: ./cache_traces/test_correctness)
    /// - `FAIL_FAST` - Stop on first failing kind, "1" or "true" (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    ///
    /// Tests pass a closure over a plain map instead of touching the
    /// process environment, which is shared across concurrent tests.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            trace_dir: get("TRACE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./cache_traces/test_correctness")),
            fail_fast: get("FAIL_FAST")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_dir: PathBuf::from("./cache_traces/test_correctness"),
            fail_fast: false,
        }
    }
}
