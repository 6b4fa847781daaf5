//! Storage record models for the persistence layer.
//!
//! This module defines the raw storage record types used for persistence operations.
//! These types are separate from domain models to maintain a clear boundary between
//! storage representation and business logic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Usage history for one launched entry.
///
/// The count is fractional: every read applies exponential decay first, so
/// an entry launched ten times last month weighs less than one launched
/// twice today. `last_used_ms` anchors the decay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEntry {
    /// Decay-adjusted launch count as of `last_used_ms`.
    pub count: f64,

    /// Unix timestamp in milliseconds of the most recent launch.
    pub last_used_ms: i64,
}

impl UsageEntry {
    /// Creates the entry for a first launch at the given time.
    ///
    /// # Examples
    ///
    /// ```
    /// use zlauncher::storage::UsageEntry;
    ///
    /// let entry = UsageEntry::first(1_700_000_000_000);
    /// assert_eq!(entry.count, 1.0);
    /// assert_eq!(entry.last_used_ms, 1_700_000_000_000);
    /// ```
    #[must_use]
    pub fn first(now_ms: i64) -> Self {
        Self {
            count: 1.0,
            last_used_ms: now_ms,
        }
    }
}

/// Top-level structure of the usage file.
///
/// Wraps the entry map in a versioned object so the format can migrate later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageData {
    /// Version of the storage format for future migrations.
    pub version: u32,

    /// Usage entries keyed by absolute path.
    #[serde(default)]
    pub entries: HashMap<String, UsageEntry>,
}

impl Default for UsageData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: HashMap::new(),
        }
    }
}
