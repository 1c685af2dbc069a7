//! ByteCache - A size-aware in-memory LRU cache
//!
//! Each entry carries an explicit byte size; inserts and updates evict
//! least-recently-used entries until the total fits a fixed capacity.
//! Ships with a trace harness that replays recorded scenarios against the
//! engine and checks expected post-conditions.

pub mod cache;
pub mod config;
pub mod error;
pub mod trace;

pub use cache::{Cache, SizedLruCache};
pub use config::Config;
pub use error::{CacheError, TraceError};
pub use trace::Registry;
