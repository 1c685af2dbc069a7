//! Trace Harness Module
//!
//! Replays scenario files against a cache and checks the expected
//! post-conditions. Cache kinds are wired up through an explicit
//! [`Registry`] handed to the runner, not through global state.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::cache::{Cache, SizedLruCache};
use crate::error::{CacheError, TraceError};
use crate::trace::{collect_trace_files, Expectation, TraceFile, TraceScenario};

// == Replay Summary ==
/// Counters collected while replaying one scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Number of access events applied
    pub events: usize,
    /// Pre-upsert lookups that found the key resident
    pub hits: usize,
    /// Pre-upsert lookups that missed
    pub misses: usize,
    /// Upserts rejected because the entry exceeded total capacity
    pub rejected: usize,
}

// == Replay ==
/// Applies every access event of a scenario to the cache, in order.
///
/// Each event is one `lookup` (hit/miss accounting, the way the recorded
/// workloads probed before writing) followed by one `upsert`. An entry too
/// large for the cache is an observable outcome and the replay continues;
/// a zero size means the scenario itself is malformed and aborts.
pub fn replay(cache: &mut dyn Cache, scenario: &TraceScenario) -> Result<ReplaySummary, TraceError> {
    let mut summary = ReplaySummary::default();

    for event in &scenario.traces {
        summary.events += 1;
        match cache.lookup(event.key) {
            Some(_) => summary.hits += 1,
            None => summary.misses += 1,
        }
        match cache.upsert(event.key, event.size) {
            Ok(()) => {}
            Err(CacheError::EntryTooLarge { key, size, capacity }) => {
                debug!("rejected oversize entry key={key} size={size} capacity={capacity}");
                summary.rejected += 1;
            }
            Err(err @ CacheError::InvalidSize { .. }) => return Err(TraceError::Replay(err)),
        }
    }

    Ok(summary)
}

// == Mismatch ==
/// One expected post-condition the final cache state failed to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mismatch {
    /// Presence differed from the expectation
    Exists {
        key: u64,
        expected: bool,
        actual: bool,
    },
    /// Stored size differed from the expectation (None = not resident)
    Size {
        key: u64,
        expected: u64,
        actual: Option<u64>,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Exists {
                key,
                expected,
                actual,
            } => write!(
                f,
                "key {key}: expected exists={expected}, found exists={actual}"
            ),
            Mismatch::Size {
                key,
                expected,
                actual: Some(actual),
            } => write!(f, "key {key}: expected size {expected}, found {actual}"),
            Mismatch::Size { key, expected, .. } => {
                write!(f, "key {key}: expected size {expected}, key not resident")
            }
        }
    }
}

// == Verify ==
/// Checks every expectation against the final cache state.
///
/// All expectations are evaluated; the returned list holds one entry per
/// failed expectation so a report shows everything wrong at once.
pub fn verify(cache: &dyn Cache, expectations: &[Expectation]) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    for expectation in expectations {
        match *expectation {
            Expectation::Exists { key, value } => {
                let actual = cache.lookup(key).is_some();
                if actual != value {
                    mismatches.push(Mismatch::Exists {
                        key,
                        expected: value,
                        actual,
                    });
                }
            }
            Expectation::GetSize { key, value } => {
                let actual = cache.lookup(key);
                if actual != Some(value) {
                    mismatches.push(Mismatch::Size {
                        key,
                        expected: value,
                        actual,
                    });
                }
            }
        }
    }

    mismatches
}

// == Scenario Outcome ==
/// Result of replaying and verifying one scenario file.
#[derive(Debug)]
pub struct ScenarioOutcome {
    /// Path of the scenario file
    pub path: PathBuf,
    /// Replay counters
    pub summary: ReplaySummary,
    /// Failed expectations, empty when the scenario passed
    pub mismatches: Vec<Mismatch>,
}

impl ScenarioOutcome {
    /// Returns true if every expectation held.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

// == Cache Kind ==
/// Builds a fresh cache of a registered kind for a given capacity.
pub type CacheFactory = fn(u64) -> Box<dyn Cache>;

/// A named cache policy plus the trace directories that exercise it.
pub struct CacheKind {
    /// Policy name, e.g. "lru"
    pub name: String,
    factory: CacheFactory,
    trace_dirs: Vec<PathBuf>,
}

impl CacheKind {
    /// Replays every scenario found in this kind's trace directories.
    ///
    /// Each scenario gets a fresh cache built at the scenario's declared
    /// capacity; directories are visited in registration order.
    pub fn run(&self) -> Result<Vec<ScenarioOutcome>, TraceError> {
        let mut outcomes = Vec::new();
        for dir in &self.trace_dirs {
            for TraceFile { path, scenario } in collect_trace_files(dir)? {
                let mut cache = (self.factory)(scenario.size);
                let summary = replay(cache.as_mut(), &scenario)?;
                let mismatches = verify(cache.as_ref(), &scenario.expected_responses);
                outcomes.push(ScenarioOutcome {
                    path,
                    summary,
                    mismatches,
                });
            }
        }
        Ok(outcomes)
    }
}

impl fmt::Debug for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheKind")
            .field("name", &self.name)
            .field("trace_dirs", &self.trace_dirs)
            .finish()
    }
}

// == Kind Report ==
/// Outcomes of every scenario of one cache kind.
#[derive(Debug)]
pub struct KindReport {
    pub kind: String,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl KindReport {
    /// Returns true if every scenario of this kind passed.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }
}

// == Registry ==
/// Explicit mapping from cache-kind name to its factory and trace
/// directories, passed into the runner.
#[derive(Debug, Default)]
pub struct Registry {
    kinds: Vec<CacheKind>,
}

impl Registry {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == Builtin Kinds ==
    /// Registers the built-in kinds over the conventional fixture layout:
    /// shared scenarios directly in `base_dir`, kind-specific ones in a
    /// subdirectory named after the kind.
    pub fn with_builtin(base_dir: &Path) -> Self {
        let mut registry = Self::new();
        registry.register(
            "lru",
            |capacity| Box::new(SizedLruCache::new(capacity)),
            vec![base_dir.to_path_buf(), base_dir.join("lru")],
        );
        registry
    }

    // == Register ==
    /// Adds a cache kind with its factory and trace directories.
    pub fn register(&mut self, name: &str, factory: CacheFactory, trace_dirs: Vec<PathBuf>) {
        self.kinds.push(CacheKind {
            name: name.to_string(),
            factory,
            trace_dirs,
        });
    }

    // == Kinds ==
    /// Returns the registered kinds in registration order.
    pub fn kinds(&self) -> &[CacheKind] {
        &self.kinds
    }

    // == Run All ==
    /// Replays every scenario of every registered kind.
    pub fn run_all(&self) -> Result<Vec<KindReport>, TraceError> {
        self.kinds
            .iter()
            .map(|kind| {
                Ok(KindReport {
                    kind: kind.name.clone(),
                    outcomes: kind.run()?,
                })
            })
            .collect()
    }
}
