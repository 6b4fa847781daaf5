//! Ranking weights record.
//!
//! These eight fields are the knobs the settings panel edits and the
//! worker's scoring consumes. The record travels the wire whole (writes
//! always send every field) but is read leniently: any field missing from
//! the stored document takes its default, so older or hand-edited files
//! still load.

use serde::{Deserialize, Serialize};

fn default_half_life_days() -> u32 {
    7
}

fn default_frequency_bonus() -> i64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_depth_penalty() -> i64 {
    2
}

fn default_exact_bonus() -> i64 {
    0
}

fn default_prefix_penalty() -> i64 {
    100
}

fn default_contains_penalty() -> i64 {
    200
}

/// Tunable ranking weights, persisted as `weights.json` in the data dir.
///
/// Scores are penalties: lower ranks higher. Bonuses are subtracted.
///
/// # Examples
///
/// ```
/// use zlauncher::domain::RankingWeights;
///
/// let weights = RankingWeights::default();
/// assert_eq!(weights.half_life_days, 7);
/// assert_eq!(weights.frequency_bonus, 500);
/// assert!(weights.prefer_apps);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    /// Frecency half-life: a use loses half its weight every this many days.
    #[serde(default = "default_half_life_days")]
    pub half_life_days: u32,

    /// Score subtracted per unit of decayed use count.
    #[serde(default = "default_frequency_bonus")]
    pub frequency_bonus: i64,

    /// Rank application entries above plain files and directories.
    #[serde(default = "default_true")]
    pub prefer_apps: bool,

    /// Penalize paths that traverse hidden components.
    #[serde(default = "default_true")]
    pub penalize_hidden: bool,

    /// Penalty per path component (deeper entries rank lower).
    #[serde(default = "default_depth_penalty")]
    pub depth_penalty: i64,

    /// Extra bonus for an exact name match.
    #[serde(default = "default_exact_bonus")]
    pub exact_bonus: i64,

    /// Penalty when the name merely starts with the query.
    #[serde(default = "default_prefix_penalty")]
    pub prefix_penalty: i64,

    /// Penalty when the name merely contains the query.
    #[serde(default = "default_contains_penalty")]
    pub contains_penalty: i64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            half_life_days: default_half_life_days(),
            frequency_bonus: default_frequency_bonus(),
            prefer_apps: true,
            penalize_hidden: true,
            depth_penalty: default_depth_penalty(),
            exact_bonus: default_exact_bonus(),
            prefix_penalty: default_prefix_penalty(),
            contains_penalty: default_contains_penalty(),
        }
    }
}
