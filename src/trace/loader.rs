//! Trace Loader Module
//!
//! Discovers and parses scenario files from a directory on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::TraceError;
use crate::trace::TraceScenario;

// == Trace File ==
/// A parsed scenario together with the path it was loaded from.
#[derive(Debug, Clone)]
pub struct TraceFile {
    pub path: PathBuf,
    pub scenario: TraceScenario,
}

// == Collect Trace Files ==
/// Loads every `*.json` scenario file directly inside `dir`.
///
/// The scan is non-recursive and results are sorted by file name so a
/// replay run is reproducible. A missing directory is not an error: it
/// yields an empty set with a warning (some kinds have no private traces).
/// A file that is present but unreadable or malformed is an error.
pub fn collect_trace_files(dir: &Path) -> Result<Vec<TraceFile>, TraceError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("trace directory {} not found, skipping", dir.display());
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(TraceError::Io {
                path: dir.to_path_buf(),
                source: err,
            })
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| TraceError::Io {
            path: dir.to_path_buf(),
            source: err,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let contents = fs::read_to_string(&path).map_err(|err| TraceError::Io {
            path: path.clone(),
            source: err,
        })?;
        let scenario: TraceScenario =
            serde_json::from_str(&contents).map_err(|err| TraceError::Parse {
                path: path.clone(),
                source: err,
            })?;
        debug!(
            "loaded {} ({} events, {} expectations)",
            path.display(),
            scenario.traces.len(),
            scenario.expected_responses.len()
        );
        files.push(TraceFile { path, scenario });
    }

    Ok(files)
}
