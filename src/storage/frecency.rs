//! Frecency decay math for launch history.
//!
//! Implements a "frecency" (frequency + recency) weighting so that entries
//! launched often *and* recently rank above entries launched often long ago.
//! The decay is exponential with a configurable half-life: after one
//! half-life an entry contributes half its count, after two a quarter, and
//! so on. The half-life comes from the user-tunable ranking weights
//! (`half_life_days`, default 7).

use super::models::UsageEntry;

/// Milliseconds per day for age conversion.
const MS_PER_DAY: f64 = 86_400_000.0;

/// Returns the decayed launch count of an entry as of `now_ms`.
///
/// The decay follows:
///
/// ```text
/// effective = count × e^(-ln2 × age_days / half_life_days)
/// ```
///
/// A half-life of zero decays everything to nothing immediately, which is
/// the sane reading of "no memory". It is handled explicitly: the naive
/// division would produce NaN for a zero-age entry.
///
/// # Examples
///
/// ```
/// use zlauncher::storage::{effective_count, UsageEntry};
///
/// let entry = UsageEntry { count: 4.0, last_used_ms: 0 };
/// let seven_days_ms = 7 * 86_400_000;
///
/// // One half-life later the count has halved.
/// let decayed = effective_count(&entry, seven_days_ms, 7);
/// assert!((decayed - 2.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn effective_count(entry: &UsageEntry, now_ms: i64, half_life_days: u32) -> f64 {
    if half_life_days == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let age_days = (now_ms - entry.last_used_ms).max(0) as f64 / MS_PER_DAY;
    let decay = f64::exp(-std::f64::consts::LN_2 * age_days / f64::from(half_life_days));
    entry.count * decay
}

/// Folds a new launch into an entry: decay the old count to `now_ms`,
/// add one, and re-anchor the timestamp.
#[must_use]
pub fn bump(entry: &UsageEntry, now_ms: i64, half_life_days: u32) -> UsageEntry {
    UsageEntry {
        count: effective_count(entry, now_ms, half_life_days) + 1.0,
        last_used_ms: now_ms,
    }
}
