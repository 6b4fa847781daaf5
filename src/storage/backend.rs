//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait that abstracts over different persistence
//! backends. This allows seamless switching between storage implementations without
//! changing business logic.
//!
//! # Design Philosophy
//!
//! The trait is designed to be minimal and focused on the actual operations needed
//! by the worker, not a generic ORM. Each method maps directly to a use case: the
//! ranker reads usage snapshots and weights, launches bump usage, and the settings
//! panel reads and writes the weights record.

use crate::domain::error::Result;
use crate::domain::weights::RankingWeights;
use crate::storage::models::UsageEntry;
use std::collections::HashMap;

/// Abstraction over persistent launcher storage.
///
/// Implementations hold two documents: the usage history that feeds frecency
/// ranking, and the ranking weights record the settings panel edits.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON files with atomic writes (default)
pub trait Storage: Send {
    /// Records a launch of `path` at `now_ms`.
    ///
    /// The stored count is decayed to `now_ms` first (using `half_life_days`),
    /// then incremented; stale and surplus entries are pruned on the way out.
    /// Returns the entry's new decayed count.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the updated history fails.
    fn record_access(&mut self, path: &str, now_ms: i64, half_life_days: u32) -> Result<f64>;

    /// Returns a snapshot of all usage entries, keyed by path.
    ///
    /// The snapshot is a copy; ranking a single query works off one
    /// consistent view regardless of concurrent launches.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn usage_snapshot(&self) -> Result<HashMap<String, UsageEntry>>;

    /// Loads the ranking weights record.
    ///
    /// Fields missing from the stored document take their defaults; a
    /// missing document is simply all defaults. This keeps old or
    /// hand-edited files loadable.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or parsed.
    fn load_weights(&self) -> Result<RankingWeights>;

    /// Persists the full weights record, replacing the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the atomic write fails.
    fn save_weights(&mut self, weights: &RankingWeights) -> Result<()>;
}
