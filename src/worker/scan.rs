//! Filesystem scan for search candidates.
//!
//! Each search walks the configured roots and collects entries whose name
//! matches the query: a case-insensitive substring match, with a fuzzy
//! subsequence fallback so near-miss typing (`ntes` for `notes`) still
//! surfaces candidates. Hidden entries are collected too; the ranking
//! weights decide how far down they land.
//!
//! `.desktop` application entries are matched against their display name
//! (the `Name=` key) as well as their file name, and carry the display
//! name into the hit.

use crate::domain::hit::SearchHit;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::path::Path;
use walkdir::WalkDir;

/// Upper bound on collected candidates per scan.
///
/// Ranking is O(n log n) over candidates; past this many the tail is noise
/// anyway, so the walk stops early instead of chewing through a huge tree.
const SCAN_CAP: usize = 5000;

/// Scan scope the worker was configured with.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScanScope {
    /// Root directories to walk, already tilde-expanded.
    pub roots: Vec<String>,

    /// Maximum depth below each root.
    pub depth: usize,

    /// Cap on hits per response (applied after ranking, not here).
    pub max_results: usize,
}

impl Default for ScanScope {
    fn default() -> Self {
        Self {
            roots: vec!["/host".to_string()],
            depth: 4,
            max_results: 64,
        }
    }
}

/// Walks the scope's roots and returns every entry matching `query`.
///
/// The result is unranked and may contain duplicates across roots; ranking
/// and deduplication happen afterwards. An empty or whitespace query yields
/// nothing (callers short-circuit that case before scanning, this is the
/// backstop).
#[must_use]
pub fn scan_candidates(scope: &ScanScope, query: &str) -> Vec<SearchHit> {
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut candidates = Vec::new();

    for root in &scope.roots {
        let _span = tracing::debug_span!("scan_root", root = %root).entered();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(scope.depth)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            if candidates.len() >= SCAN_CAP {
                tracing::debug!(cap = SCAN_CAP, "scan cap reached, stopping early");
                return candidates;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };

            let path = entry.path().to_string_lossy().into_owned();
            let is_dir = entry.file_type().is_dir();

            let display_name = if file_name.ends_with(".desktop") && !is_dir {
                desktop_entry_name(entry.path()).unwrap_or_else(|| file_name.to_string())
            } else {
                file_name.to_string()
            };

            if name_matches(file_name, &query_lower, &matcher)
                || name_matches(&display_name, &query_lower, &matcher)
            {
                candidates.push(SearchHit::new(display_name, path, is_dir));
            }
        }
    }

    tracing::debug!(count = candidates.len(), "scan complete");
    candidates
}

/// Whether a name matches the query, by substring or fuzzy subsequence.
fn name_matches(name: &str, query_lower: &str, matcher: &SkimMatcherV2) -> bool {
    let name_lower = name.to_lowercase();
    name_lower.contains(query_lower) || matcher.fuzzy_match(&name_lower, query_lower).is_some()
}

/// Extracts the display name from a `.desktop` entry.
///
/// Takes the first `Name=` key in the file, which by convention belongs to
/// the `[Desktop Entry]` group. Returns `None` for unreadable files or
/// entries without a usable name.
fn desktop_entry_name(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    contents
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("Name="))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}
