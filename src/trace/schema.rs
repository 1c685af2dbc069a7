//! Trace Schema Module
//!
//! Serde types for the JSON scenario files the harness replays.
//!
//! A scenario declares a cache capacity, an ordered list of access events
//! to apply via `upsert`, and an ordered list of expected post-conditions
//! checked via `lookup` after the full replay.

use serde::Deserialize;

// == Trace Scenario ==
/// One scenario file.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceScenario {
    /// Cache capacity in bytes
    pub size: u64,
    /// Ordered access events, applied one `upsert` each
    pub traces: Vec<AccessEvent>,
    /// Post-conditions checked after the full replay
    #[serde(rename = "expectedResponses")]
    pub expected_responses: Vec<Expectation>,
}

// == Access Event ==
/// A single keyed access with its declared byte size.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AccessEvent {
    pub key: u64,
    pub size: u64,
}

// == Expectation ==
/// An expected post-condition on the final cache state.
///
/// Tagged by the `event` field: `exists` carries a boolean, `get_size`
/// the exact stored size. Any other event name is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Expectation {
    /// Whether `lookup` should find the key at all
    Exists { key: u64, value: bool },
    /// The exact size `lookup` should return
    GetSize { key: u64, value: u64 },
}
