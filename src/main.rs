//! ByteCache conformance runner
//!
//! Replays every registered scenario directory against its cache kind and
//! reports pass/fail per scenario.
//!
//! # Run Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Build the cache-kind registry over the trace directory
//! 4. Replay every kind's scenarios and verify expectations
//! 5. Exit non-zero if any scenario failed

mod cache;
mod config;
mod error;
mod trace;

use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use trace::Registry;

fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bytecache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ByteCache conformance runner");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: trace_dir={}, fail_fast={}",
        config.trace_dir.display(),
        config.fail_fast
    );

    let registry = Registry::with_builtin(&config.trace_dir);

    let mut scenarios = 0usize;
    let mut failures = 0usize;

    for kind in registry.kinds() {
        let outcomes = kind
            .run()
            .with_context(|| format!("replaying scenarios for kind '{}'", kind.name))?;

        for outcome in &outcomes {
            scenarios += 1;
            if outcome.passed() {
                info!(
                    "PASS {} [{}]: {} events, {} hits, {} misses, {} rejected",
                    outcome.path.display(),
                    kind.name,
                    outcome.summary.events,
                    outcome.summary.hits,
                    outcome.summary.misses,
                    outcome.summary.rejected
                );
            } else {
                failures += 1;
                error!(
                    "FAIL {} [{}]: {} mismatched expectation(s)",
                    outcome.path.display(),
                    kind.name,
                    outcome.mismatches.len()
                );
                for mismatch in &outcome.mismatches {
                    error!("  {}", mismatch);
                }
            }
        }

        if config.fail_fast && failures > 0 {
            error!("Stopping after kind '{}' (fail-fast)", kind.name);
            break;
        }
    }

    if failures > 0 {
        error!("{failures} of {scenarios} scenario(s) failed");
        return Ok(ExitCode::FAILURE);
    }

    info!("All {scenarios} scenario(s) passed");
    Ok(ExitCode::SUCCESS)
}
