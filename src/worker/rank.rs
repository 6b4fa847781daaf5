//! Candidate scoring, deduplication, and ordering.
//!
//! Scores are penalties: the best hit has the lowest score. The tunable
//! parts come from the [`RankingWeights`] record the settings panel edits;
//! the structural constants (app preference, hidden components, location
//! quality) are fixed.

use crate::domain::hit::SearchHit;
use crate::domain::weights::RankingWeights;
use crate::storage::frecency::effective_count;
use crate::storage::models::UsageEntry;
use std::collections::{HashMap, HashSet};

/// Penalty for non-application entries when `prefer_apps` is on.
const APP_PREFERENCE_PENALTY: i64 = 1000;

/// Penalty per hidden path component when `penalize_hidden` is on.
const HIDDEN_COMPONENT_PENALTY: i64 = 500;

/// Penalty for paths outside the conventional application locations.
const NONSTANDARD_LOCATION_PENALTY: i64 = 50;

/// Penalty for autostart/xdg paths, which are launched by the system and
/// rarely what the user is typing for.
const AUTOSTART_LOCATION_PENALTY: i64 = 30;

/// Conventional locations for application entries.
const STANDARD_APP_DIRS: [&str; 3] = [
    "/usr/share/applications",
    "/usr/lib",
    ".local/share/applications",
];

/// Scores one hit against the query. Lower is better.
///
/// The score combines the name-match tier, app preference, path quality,
/// name length, and the frecency bonus from usage history.
#[must_use]
pub fn score_hit(
    hit: &SearchHit,
    query: &str,
    weights: &RankingWeights,
    usage: &HashMap<String, UsageEntry>,
    now_ms: i64,
) -> i64 {
    let name = hit.name.to_lowercase();
    let q = query.trim().to_lowercase();

    let match_penalty = if name == q {
        -weights.exact_bonus
    } else if name.starts_with(&q) {
        weights.prefix_penalty
    } else if name.contains(&q) {
        weights.contains_penalty
    } else {
        // fuzzy-only candidates land behind every substring match
        weights.prefix_penalty + weights.contains_penalty
    };

    let type_penalty = if weights.prefer_apps && !hit.is_app() {
        APP_PREFERENCE_PENALTY
    } else {
        0
    };

    let path_penalty = score_path_quality(&hit.path, weights);

    let length_penalty = hit.name.len() as i64;

    let frequency_bonus = calc_frequency_bonus(&hit.path, weights, usage, now_ms);

    match_penalty + type_penalty + path_penalty + length_penalty - frequency_bonus
}

/// Frecency bonus for a path: decayed launch count times `frequency_bonus`.
fn calc_frequency_bonus(
    path: &str,
    weights: &RankingWeights,
    usage: &HashMap<String, UsageEntry>,
    now_ms: i64,
) -> i64 {
    usage
        .get(path)
        .map(|entry| {
            #[allow(clippy::cast_precision_loss)]
            let scaled =
                effective_count(entry, now_ms, weights.half_life_days) * weights.frequency_bonus as f64;
            #[allow(clippy::cast_possible_truncation)]
            let bonus = scaled as i64;
            bonus
        })
        .unwrap_or(0)
}

/// Structural penalty for where the entry lives.
fn score_path_quality(path: &str, weights: &RankingWeights) -> i64 {
    let mut penalty = 0i64;

    let is_standard = STANDARD_APP_DIRS.iter().any(|d| path.contains(d));
    if !is_standard {
        penalty += NONSTANDARD_LOCATION_PENALTY;
    }

    if path.contains("/autostart/") || path.contains("/xdg/") {
        penalty += AUTOSTART_LOCATION_PENALTY;
    }

    let depth = path.matches('/').count() as i64;
    penalty += depth * weights.depth_penalty;

    if weights.penalize_hidden {
        // `.local` is exempt: it hosts the standard per-user app dir
        let hidden_count = path
            .split('/')
            .filter(|p| p.starts_with('.') && *p != ".local")
            .count() as i64;
        penalty += hidden_count * HIDDEN_COMPONENT_PENALTY;
    }

    penalty
}

/// Collapses duplicate candidates, keeping the first occurrence.
///
/// Applications deduplicate by app id so the flatpak, snap, and distro
/// spellings of the same app collapse into one row; everything else by
/// lowercased name. Call this on an already-ranked list so the best
/// spelling survives.
#[must_use]
pub fn dedupe_hits(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|hit| {
            let key = if hit.is_app() {
                extract_app_id(&hit.path)
            } else {
                hit.name.to_lowercase()
            };
            seen.insert(key)
        })
        .collect()
}

/// Derives a launcher-agnostic app id from a `.desktop` path.
///
/// `org.mozilla.firefox.desktop`, `firefox_firefox.desktop` (snap), and
/// `firefox.desktop` all reduce to `firefox`.
#[must_use]
pub fn extract_app_id(path: &str) -> String {
    let stem = std::path::Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let after_dots = stem.split('.').next_back().unwrap_or(&stem);
    after_dots
        .split('_')
        .next_back()
        .unwrap_or(after_dots)
        .to_lowercase()
}

/// Ranks candidates for a query: score, sort best-first, dedupe, cap.
#[must_use]
pub fn rank_hits(
    mut candidates: Vec<SearchHit>,
    query: &str,
    weights: &RankingWeights,
    usage: &HashMap<String, UsageEntry>,
    now_ms: i64,
    cap: usize,
) -> Vec<SearchHit> {
    candidates.sort_by_key(|hit| score_hit(hit, query, weights, usage, now_ms));

    let mut hits = dedupe_hits(candidates);
    hits.truncate(cap);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, path: &str) -> SearchHit {
        SearchHit::new(name.to_string(), path.to_string(), false)
    }

    fn no_usage() -> HashMap<String, UsageEntry> {
        HashMap::new()
    }

    mod score_hit {
        use super::*;

        #[test]
        fn exact_beats_prefix_beats_contains_beats_fuzzy() {
            // Arrange: same location, names differing only in match tier
            let weights = RankingWeights::default();
            let usage = no_usage();
            let exact = file("vim", "/host/bin/vim");
            let prefix = file("vimdiff", "/host/bin/vimdiff");
            let contains = file("neovim", "/host/bin/neovim");
            let fuzzy = file("v_i_m", "/host/bin/v_i_m");

            // Act
            let s_exact = score_hit(&exact, "vim", &weights, &usage, 0);
            let s_prefix = score_hit(&prefix, "vim", &weights, &usage, 0);
            let s_contains = score_hit(&contains, "vim", &weights, &usage, 0);
            let s_fuzzy = score_hit(&fuzzy, "vim", &weights, &usage, 0);

            // Assert
            assert!(s_exact < s_prefix);
            assert!(s_prefix < s_contains);
            assert!(s_contains < s_fuzzy);
        }

        #[test]
        fn apps_beat_plain_files_when_preferred() {
            let weights = RankingWeights::default();
            let usage = no_usage();
            let app = file("editor", "/host/.local/share/applications/editor.desktop");
            let plain = file("editor", "/host/editor");

            let s_app = score_hit(&app, "editor", &weights, &usage, 0);
            let s_plain = score_hit(&plain, "editor", &weights, &usage, 0);

            assert!(s_app < s_plain);
        }

        #[test]
        fn app_preference_can_be_turned_off() {
            // Arrange: identical names, the app buried deeper
            let mut weights = RankingWeights::default();
            weights.prefer_apps = false;
            let usage = no_usage();
            let app = file("editor", "/host/baz/deep/inner/editor.desktop");
            let plain = file("editor", "/host/editor");

            // Act
            let s_app = score_hit(&app, "editor", &weights, &usage, 0);
            let s_plain = score_hit(&plain, "editor", &weights, &usage, 0);

            // Assert: with no app bias the shallower plain file wins
            assert!(s_plain < s_app);
        }

        #[test]
        fn hidden_components_sink_the_score() {
            let weights = RankingWeights::default();
            let usage = no_usage();
            let hidden = file("cfg.toml", "/host/.cache/cfg.toml");
            let visible = file("cfg.toml", "/host/cache/cfg.toml");

            let s_hidden = score_hit(&hidden, "cfg", &weights, &usage, 0);
            let s_visible = score_hit(&visible, "cfg", &weights, &usage, 0);

            assert!(s_hidden - s_visible >= 500);
        }

        #[test]
        fn dot_local_is_not_counted_as_hidden() {
            let weights = RankingWeights::default();
            let usage = no_usage();
            let in_local = file("app.desktop", "/host/.local/share/applications/app.desktop");
            let in_cache = file("app.desktop", "/host/.cache/share/applications/app.desktop");

            let s_local = score_hit(&in_local, "app", &weights, &usage, 0);
            let s_cache = score_hit(&in_cache, "app", &weights, &usage, 0);

            assert!(s_local < s_cache);
        }

        #[test]
        fn hidden_penalty_can_be_turned_off() {
            let mut weights = RankingWeights::default();
            weights.penalize_hidden = false;
            let usage = no_usage();
            let hidden = file("cfg.toml", "/host/.cache/cfg.toml");
            let visible = file("cfg.toml", "/host/cache/cfg.toml");

            let s_hidden = score_hit(&hidden, "cfg", &weights, &usage, 0);
            let s_visible = score_hit(&visible, "cfg", &weights, &usage, 0);

            assert_eq!(s_hidden, s_visible);
        }

        #[test]
        fn deeper_paths_rank_lower() {
            let weights = RankingWeights::default();
            let usage = no_usage();
            let shallow = file("notes.md", "/host/notes.md");
            let deep = file("notes.md", "/host/a/b/c/d/notes.md");

            let s_shallow = score_hit(&shallow, "notes", &weights, &usage, 0);
            let s_deep = score_hit(&deep, "notes", &weights, &usage, 0);

            assert!(s_shallow < s_deep);
        }

        #[test]
        fn frequent_launches_lift_an_entry() {
            // Arrange: identical files, one launched five times just now
            let weights = RankingWeights::default();
            let mut usage = no_usage();
            usage.insert(
                "/host/a/notes.md".to_string(),
                UsageEntry { count: 5.0, last_used_ms: 0 },
            );
            let used = file("notes.md", "/host/a/notes.md");
            let unused = file("notes.md", "/host/b/notes.md");

            // Act
            let s_used = score_hit(&used, "notes", &weights, &usage, 0);
            let s_unused = score_hit(&unused, "notes", &weights, &usage, 0);

            // Assert: five launches x 500 bonus dwarfs everything else here
            assert!(s_used < s_unused);
        }

        #[test]
        fn exact_bonus_rewards_exact_matches_only() {
            let mut weights = RankingWeights::default();
            weights.exact_bonus = 250;
            let usage = no_usage();
            let exact = file("vim", "/host/vim");
            let prefix = file("vimdiff", "/host/vimdiff");

            let s_exact = score_hit(&exact, "vim", &weights, &usage, 0);
            let s_exact_default =
                score_hit(&exact, "vim", &RankingWeights::default(), &usage, 0);
            let s_prefix = score_hit(&prefix, "vim", &weights, &usage, 0);
            let s_prefix_default =
                score_hit(&prefix, "vim", &RankingWeights::default(), &usage, 0);

            assert_eq!(s_exact_default - s_exact, 250);
            assert_eq!(s_prefix_default, s_prefix);
        }
    }

    mod extract_app_id {
        use super::*;

        #[test]
        fn strips_reverse_dns_prefixes() {
            assert_eq!(extract_app_id("/apps/org.mozilla.firefox.desktop"), "firefox");
        }

        #[test]
        fn strips_snap_underscore_prefixes() {
            assert_eq!(extract_app_id("/apps/firefox_firefox.desktop"), "firefox");
        }

        #[test]
        fn lowercases_plain_ids() {
            assert_eq!(extract_app_id("/apps/Firefox.desktop"), "firefox");
        }
    }

    mod dedupe_hits {
        use super::*;

        fn app(name: &str, path: &str) -> SearchHit {
            SearchHit::new(name.to_string(), path.to_string(), false)
        }

        #[test]
        fn collapses_app_spellings_keeping_the_first() {
            // Arrange: flatpak and distro spellings of the same app
            let hits = vec![
                app("Firefox", "/host/.local/share/applications/firefox.desktop"),
                app("Firefox", "/host/flatpak/org.mozilla.firefox.desktop"),
            ];

            // Act
            let deduped = dedupe_hits(hits);

            // Assert
            assert_eq!(deduped.len(), 1);
            assert!(deduped[0].path.ends_with("firefox.desktop"));
            assert!(deduped[0].path.contains(".local"));
        }

        #[test]
        fn non_apps_dedupe_by_name_case_insensitively() {
            let hits = vec![
                file("README.md", "/host/a/README.md"),
                file("readme.md", "/host/b/readme.md"),
                file("CHANGELOG.md", "/host/a/CHANGELOG.md"),
            ];

            let deduped = dedupe_hits(hits);

            assert_eq!(deduped.len(), 2);
            assert_eq!(deduped[0].path, "/host/a/README.md");
        }

        #[test]
        fn app_id_and_matching_file_name_share_one_row() {
            // The app id and the lowercased binary name land on the same
            // key, so the binary folds into the app entry.
            let hits = vec![
                app("firefox", "/host/apps/firefox.desktop"),
                file("firefox", "/host/bin/firefox"),
            ];

            let deduped = dedupe_hits(hits);

            assert_eq!(deduped.len(), 1);
            assert!(deduped[0].is_app());
        }
    }

    mod rank_hits {
        use super::*;

        #[test]
        fn orders_best_first_and_caps() {
            // Arrange
            let weights = RankingWeights::default();
            let usage = no_usage();
            let candidates = vec![
                file("notebook.txt", "/host/notebook.txt"),
                file("notes", "/host/notes"),
                file("footnotes.md", "/host/footnotes.md"),
            ];

            // Act
            let ranked = rank_hits(candidates, "notes", &weights, &usage, 0, 2);

            // Assert: exact first, cap applied
            assert_eq!(ranked.len(), 2);
            assert_eq!(ranked[0].name, "notes");
        }

        #[test]
        fn duplicate_with_the_better_score_survives_dedupe() {
            // Arrange: same name, one buried under a hidden dir
            let weights = RankingWeights::default();
            let usage = no_usage();
            let candidates = vec![
                file("notes.md", "/host/.stash/notes.md"),
                file("notes.md", "/host/notes.md"),
            ];

            // Act
            let ranked = rank_hits(candidates, "notes", &weights, &usage, 0, 10);

            // Assert
            assert_eq!(ranked.len(), 1);
            assert_eq!(ranked[0].path, "/host/notes.md");
        }
    }
}
