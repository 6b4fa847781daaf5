//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! Two documents live side by side in the data directory:
//!
//! - `usage.json` — launch history feeding frecency ranking, cached in
//!   memory and flushed lazily.
//! - `weights.json` — the ranking weights record; read on demand and
//!   rewritten whole on every save, so the file always mirrors exactly
//!   what the settings panel last committed.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads the usage file into memory once
//! - **Write**: O(n) - serializes and writes the entire dataset
//! - **Best for**: < 1000 usage entries, infrequent writes

use crate::domain::error::{LauncherError, Result};
use crate::domain::weights::RankingWeights;
use crate::storage::backend::Storage;
use crate::storage::frecency::{bump, effective_count};
use crate::storage::models::{UsageData, UsageEntry};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Entries whose decayed count falls to or below this are dropped on save.
const PRUNE_THRESHOLD: f64 = 0.1;

/// Hard cap on stored usage entries; the weakest are evicted past this.
const MAX_USAGE_ENTRIES: usize = 1000;

/// JSON file storage backend.
///
/// Keeps the usage history in memory and persists it with atomic writes.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It's designed to be used from a single
/// worker instance, matching the Zellij plugin architecture.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "/home/user/notes.md": {
///       "count": 3.2,
///       "last_used_ms": 1712345678901
///     }
///   }
/// }
/// ```
pub struct JsonStorage {
    /// Directory holding `usage.json` and `weights.json`.
    data_dir: PathBuf,

    /// In-memory usage cache, loaded on creation.
    usage: UsageData,

    /// Tracks if usage data has been modified since last save.
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend rooted at `data_dir`.
    ///
    /// If the usage file exists, loads it. Otherwise starts empty. The
    /// directory is created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Directory creation fails
    /// - The usage file exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zlauncher::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/zlauncher"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        tracing::debug!(dir = ?data_dir, "initializing JSON storage");

        std::fs::create_dir_all(&data_dir)?;

        let usage_path = data_dir.join("usage.json");
        let usage = if usage_path.exists() {
            tracing::debug!("loading existing usage data");
            Self::load_usage(&usage_path)?
        } else {
            tracing::debug!("initializing new empty usage data");
            UsageData::default()
        };

        tracing::debug!(entry_count = usage.entries.len(), "storage initialized");

        Ok(Self {
            data_dir,
            usage,
            dirty: false,
        })
    }

    fn usage_path(&self) -> PathBuf {
        self.data_dir.join("usage.json")
    }

    fn weights_path(&self) -> PathBuf {
        self.data_dir.join("weights.json")
    }

    /// Loads usage data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_usage(path: &Path) -> Result<UsageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: UsageData = serde_json::from_str(&contents)
            .map_err(|e| LauncherError::Storage(format!("failed to parse usage JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded usage data"
        );

        Ok(data)
    }

    /// Saves usage data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it to the target
    /// path. This ensures the file is never left in a corrupt state, even if the
    /// process crashes mid-write.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temp write, or the rename fails.
    fn save_usage(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let target = self.usage_path();
        tracing::debug!(path = ?target, "saving usage data");

        let json = serde_json::to_string_pretty(&self.usage)
            .map_err(|e| LauncherError::Storage(format!("failed to serialize usage JSON: {e}")))?;

        atomic_write(&target, &json)?;

        self.dirty = false;
        tracing::debug!("usage data saved");
        Ok(())
    }

    /// Drops entries that decayed into noise and enforces the size cap.
    ///
    /// Eviction past the cap removes the weakest entries first, so a long
    /// session of one-off launches cannot wash out the real favorites.
    fn prune(&mut self, now_ms: i64, half_life_days: u32) {
        let before = self.usage.entries.len();

        self.usage
            .entries
            .retain(|_, entry| effective_count(entry, now_ms, half_life_days) > PRUNE_THRESHOLD);

        if self.usage.entries.len() > MAX_USAGE_ENTRIES {
            let mut ranked: Vec<(String, f64)> = self
                .usage
                .entries
                .iter()
                .map(|(path, entry)| (path.clone(), effective_count(entry, now_ms, half_life_days)))
                .collect();
            ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

            let keep: std::collections::HashSet<String> = ranked
                .into_iter()
                .take(MAX_USAGE_ENTRIES)
                .map(|(path, _)| path)
                .collect();
            self.usage.entries.retain(|path, _| keep.contains(path));
        }

        let removed = before - self.usage.entries.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.usage.entries.len(), "pruned usage entries");
        }
    }
}

impl Storage for JsonStorage {
    fn record_access(&mut self, path: &str, now_ms: i64, half_life_days: u32) -> Result<f64> {
        let _span = tracing::debug_span!("json_record_access", path = %path).entered();

        let entry = match self.usage.entries.get(path) {
            Some(existing) => bump(existing, now_ms, half_life_days),
            None => UsageEntry::first(now_ms),
        };
        let new_count = entry.count;
        self.usage.entries.insert(path.to_string(), entry);

        self.prune(now_ms, half_life_days);

        self.dirty = true;
        self.save_usage()?;

        tracing::debug!(new_count, "launch recorded");
        Ok(new_count)
    }

    fn usage_snapshot(&self) -> Result<HashMap<String, UsageEntry>> {
        let _span = tracing::debug_span!("json_usage_snapshot").entered();

        let snapshot = self.usage.entries.clone();

        tracing::debug!(count = snapshot.len(), "usage snapshot taken");
        Ok(snapshot)
    }

    fn load_weights(&self) -> Result<RankingWeights> {
        let _span = tracing::debug_span!("json_load_weights").entered();

        let path = self.weights_path();
        if !path.exists() {
            tracing::debug!("no weights file, using defaults");
            return Ok(RankingWeights::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let weights: RankingWeights = serde_json::from_str(&contents)
            .map_err(|e| LauncherError::Storage(format!("failed to parse weights JSON: {e}")))?;

        tracing::debug!("weights loaded");
        Ok(weights)
    }

    fn save_weights(&mut self, weights: &RankingWeights) -> Result<()> {
        let _span = tracing::debug_span!("json_save_weights").entered();

        let json = serde_json::to_string_pretty(weights)
            .map_err(|e| LauncherError::Storage(format!("failed to serialize weights JSON: {e}")))?;

        atomic_write(&self.weights_path(), &json)?;

        tracing::debug!("weights saved");
        Ok(())
    }
}

impl Drop for JsonStorage {
    /// Ensures usage data is saved on drop, even if a save was skipped earlier.
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty usage data on drop");
            if let Err(e) = self.save_usage() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

/// Writes `contents` to `target` via a temp file and rename.
fn atomic_write(target: &Path, contents: &str) -> Result<()> {
    let tmp_path = target.with_extension("tmp");

    tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
    std::fs::write(&tmp_path, contents)?;

    tracing::trace!("renaming temporary file to final location");
    std::fs::rename(&tmp_path, target)?;

    Ok(())
}
