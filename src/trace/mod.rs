//! Trace Module
//!
//! On-disk scenario files and the harness that replays them against a
//! cache: schema types, directory discovery, and the replay/verify runner
//! with its cache-kind registry.

mod harness;
mod loader;
mod schema;

// Re-export public types
pub use harness::{
    replay, verify, CacheFactory, CacheKind, KindReport, Mismatch, Registry, ReplaySummary,
    ScenarioOutcome,
};
pub use loader::{collect_trace_files, TraceFile};
pub use schema::{AccessEvent, Expectation, TraceScenario};
