//! Launcher state and view model computation.
//!
//! This module defines [`LauncherState`], the single owner of all interaction
//! state: the query buffer, the current result set and selection, the
//! interaction phase, the pending deadlines for debounce/timeout/notice
//! expiry, and the settings form. The event handler mutates it; the renderer
//! reads it through [`LauncherState::compute_viewmodel`].
//!
//! # Deadlines instead of timers
//!
//! Host timers are anonymous and cannot be cancelled, so nothing here holds a
//! timer handle. Instead the state stores absolute deadlines in epoch millis
//! (`debounce_due_at`, `timeout_due_at`, the notice expiry) and the handler
//! compares them against the clock on every timer wake-up. Superseded
//! deadlines are simply overwritten; the stale timer still fires but finds
//! nothing due.
//!
//! # Example
//!
//! ```rust
//! use zlauncher::app::LauncherState;
//! use zlauncher::ui::theme::Theme;
//! use zlauncher::worker::ScanScope;
//!
//! let state = LauncherState::new(Theme::default(), ScanScope::default());
//! assert!(state.selected_hit().is_none());
//! ```

use super::modes::{Mode, Phase};
use super::settings::{SettingsForm, FIELD_COUNT, FIELD_LABELS};
use crate::domain::SearchHit;
use crate::ui::helpers::{clip, clip_tail, sanitize};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    list_capacity, FieldRow, HitRow, SearchView, SettingsView, UiViewModel, LIST_TOP, NAME_WIDTH,
};
use crate::worker::ScanScope;

/// Quiet period between the last edit and the search dispatch.
pub const QUIET_PERIOD_MS: i64 = 100;

/// How long a dispatched search may stay unanswered before the pane gives up
/// and returns to idle.
pub const SEARCH_TIMEOUT_MS: i64 = 5_000;

/// How long the "Saved" confirmation stays on screen.
pub const SAVED_NOTICE_MS: i64 = 2_000;

/// How long failure notices stay on screen.
pub const ERROR_NOTICE_MS: i64 = 3_000;

/// Indicator column plus the gaps around the name column.
const ROW_CHROME: usize = 2 + 2 + 2;

/// A transient status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Text shown in the status row.
    pub text: String,

    /// Absolute expiry in epoch millis; sticky until replaced when `None`.
    pub clear_due_at: Option<i64>,
}

/// Central interaction state, owned by the plugin struct.
///
/// Everything the handler and renderer need lives here; no module-level
/// mutable state exists anywhere in the crate.
#[derive(Debug, Clone)]
pub struct LauncherState {
    /// The query buffer, exactly as typed (sent untrimmed; trimming is only
    /// the emptiness test).
    pub query: String,

    /// Current result set, in backend ranking order. Replaced wholesale by
    /// result pushes, never merged.
    pub hits: Vec<SearchHit>,

    /// Index of the selected hit. Meaningless while `hits` is empty;
    /// [`selected_hit`](Self::selected_hit) returns `None` then.
    pub selected: usize,

    /// First visible row of the list window.
    pub scroll_offset: usize,

    /// Where the current interaction stands.
    pub phase: Phase,

    /// Search view or settings panel.
    pub mode: Mode,

    /// Sequence number of the most recent dispatched search. Result pushes
    /// echo it; anything older is discarded. Also bumped without a dispatch
    /// when the query is cleared, so late results cannot repopulate an
    /// emptied box.
    pub seq: u64,

    /// Pending debounce deadline, epoch millis.
    pub debounce_due_at: Option<i64>,

    /// Deadline by which the dispatched search must answer, epoch millis.
    pub timeout_due_at: Option<i64>,

    /// Transient status line, if any.
    pub notice: Option<Notice>,

    /// Ranking-weights form state.
    pub settings: SettingsForm,

    /// Color scheme for rendering.
    pub theme: Theme,

    /// Scan scope forwarded to the worker once permissions are granted.
    pub scope: ScanScope,

    /// Pane height at the last render, for scroll and click arithmetic.
    pub last_rows: usize,

    /// Pane width at the last render.
    pub last_cols: usize,
}

impl LauncherState {
    /// Creates a fresh idle state.
    #[must_use]
    pub fn new(theme: Theme, scope: ScanScope) -> Self {
        Self {
            query: String::new(),
            hits: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            phase: Phase::Idle,
            mode: Mode::Search,
            seq: 0,
            debounce_due_at: None,
            timeout_due_at: None,
            notice: None,
            settings: SettingsForm::default(),
            theme,
            scope,
            last_rows: 0,
            last_cols: 0,
        }
    }

    /// The hit under the selection, or `None` while the set is empty.
    #[must_use]
    pub fn selected_hit(&self) -> Option<&SearchHit> {
        self.hits.get(self.selected)
    }

    /// Installs a new result set, replacing the old one wholesale.
    ///
    /// The selection resets to the first row and the window scrolls back to
    /// the top. Hits without a path are unusable for every verb and are
    /// dropped here rather than validated per keystroke later.
    pub fn replace_hits(&mut self, hits: Vec<SearchHit>) {
        self.hits = hits;
        self.hits.retain(|hit| !hit.path.is_empty());
        self.selected = 0;
        self.scroll_offset = 0;
    }

    /// Moves the selection down one row, wrapping from the last to the
    /// first. No-op on an empty set.
    pub fn move_selection_down(&mut self) {
        if self.hits.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.hits.len();
        self.ensure_selection_visible();
    }

    /// Moves the selection up one row, wrapping from the first to the last.
    /// No-op on an empty set.
    pub fn move_selection_up(&mut self) {
        if self.hits.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.hits.len() - 1
        } else {
            self.selected - 1
        };
        self.ensure_selection_visible();
    }

    /// Scrolls the window the minimum amount that brings the selection into
    /// view: above the window snaps the window up to the selection, below
    /// snaps it down, in-window moves leave it alone.
    fn ensure_selection_visible(&mut self) {
        let capacity = list_capacity(self.last_rows);
        if capacity == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + capacity {
            self.scroll_offset = self.selected + 1 - capacity;
        }
    }

    /// Records the pane size at render time and re-clamps the window.
    ///
    /// Called by the runtime before every frame so click mapping and scroll
    /// arithmetic always match what was last drawn.
    pub fn remember_size(&mut self, rows: usize, cols: usize) {
        self.last_rows = rows;
        self.last_cols = cols;
        let capacity = list_capacity(rows);
        let max_offset = self.hits.len().saturating_sub(capacity);
        if self.scroll_offset > max_offset {
            self.scroll_offset = max_offset;
        }
        self.ensure_selection_visible();
    }

    /// Maps a pane line (0-based from the top) to the index of the hit
    /// rendered there, if any.
    #[must_use]
    pub fn hit_index_at_line(&self, line: usize) -> Option<usize> {
        let row = line.checked_sub(LIST_TOP)?;
        if row >= list_capacity(self.last_rows) {
            return None;
        }
        let index = self.scroll_offset + row;
        (index < self.hits.len()).then_some(index)
    }

    /// Clears the interaction back to a fresh idle search view.
    ///
    /// Bumps the sequence number so any still-in-flight response is stale on
    /// arrival.
    pub fn reset_interaction(&mut self) {
        self.query.clear();
        self.hits.clear();
        self.selected = 0;
        self.scroll_offset = 0;
        self.phase = Phase::Idle;
        self.mode = Mode::Search;
        self.debounce_due_at = None;
        self.timeout_due_at = None;
        self.notice = None;
        self.seq += 1;
    }

    /// Puts up a status line, replacing any current one.
    pub fn set_notice(&mut self, text: impl Into<String>, clear_due_at: Option<i64>) {
        self.notice = Some(Notice {
            text: text.into(),
            clear_due_at,
        });
    }

    /// Computes the renderable representation of the current state.
    ///
    /// Pure with respect to `self`; all windowing and text clipping happen
    /// here so the renderer only places strings. The selection is forced
    /// into the window even if the stored offset predates a resize.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UiViewModel {
        match self.mode {
            Mode::Search => UiViewModel::Search(self.compute_search_view(rows, cols)),
            Mode::Settings => UiViewModel::Settings(self.compute_settings_view(cols)),
        }
    }

    fn compute_search_view(&self, rows: usize, cols: usize) -> SearchView {
        let capacity = list_capacity(rows);
        let total = self.hits.len();

        let mut offset = self.scroll_offset.min(total.saturating_sub(capacity));
        if capacity > 0 {
            if self.selected < offset {
                offset = self.selected;
            } else if self.selected >= offset + capacity {
                offset = self.selected + 1 - capacity;
            }
        }
        let end = (offset + capacity).min(total);

        let path_width = cols.saturating_sub(NAME_WIDTH + ROW_CHROME);
        let list_rows = self.hits[offset..end]
            .iter()
            .enumerate()
            .map(|(row, hit)| HitRow {
                indicator: if hit.is_dir { 'd' } else { '-' },
                name: clip(&sanitize(&hit.name), NAME_WIDTH),
                path: clip_tail(&sanitize(&hit.path), path_width),
                selected: offset + row == self.selected,
            })
            .collect();

        SearchView {
            query: sanitize(&self.query),
            status: self.search_status(),
            rows: list_rows,
            show_help: total == 0,
            footer: search_footer(),
        }
    }

    fn search_status(&self) -> Option<String> {
        if let Some(notice) = &self.notice {
            return Some(notice.text.clone());
        }
        if self.phase == Phase::Querying {
            return Some("searching...".to_string());
        }
        if !self.hits.is_empty() {
            return Some(format!("{}/{}", self.selected + 1, self.hits.len()));
        }
        None
    }

    fn compute_settings_view(&self, cols: usize) -> SettingsView {
        let value_width = cols.saturating_sub(30);
        let fields = (0..FIELD_COUNT)
            .map(|index| FieldRow {
                label: FIELD_LABELS[index],
                value: clip(&self.settings.field_text(index), value_width),
                focused: index == self.settings.focused,
                is_toggle: SettingsForm::is_toggle(index),
            })
            .collect();

        let status = if let Some(notice) = &self.notice {
            Some(notice.text.clone())
        } else if self.settings.saving {
            Some("Saving...".to_string())
        } else {
            None
        };

        SettingsView {
            fields,
            status,
            saving: self.settings.saving,
            footer: settings_footer(),
        }
    }
}

fn search_footer() -> String {
    "Enter: open  Ctrl+Enter: terminal  Shift+Enter: folder  Alt+Enter: copy  Esc: close"
        .to_string()
}

fn settings_footer() -> String {
    "Up/Down: field  Space: toggle  Ctrl+S: save  Ctrl+R: defaults  Esc: back".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(name: &str, path: &str, is_dir: bool) -> SearchHit {
        SearchHit::new(name.to_string(), path.to_string(), is_dir)
    }

    fn listed_state(count: usize) -> LauncherState {
        let mut state = LauncherState::new(Theme::default(), ScanScope::default());
        state.last_rows = 20;
        state.last_cols = 80;
        let hits = (0..count)
            .map(|n| hit(&format!("hit-{n}"), &format!("/tmp/hit-{n}"), false))
            .collect();
        state.replace_hits(hits);
        state.phase = Phase::Listing;
        state
    }

    mod replace_hits {
        use super::*;

        #[test]
        fn resets_selection_and_scroll() {
            // Arrange
            let mut state = listed_state(10);
            state.selected = 7;
            state.scroll_offset = 4;

            // Act
            state.replace_hits(vec![hit("a", "/a", false), hit("b", "/b", true)]);

            // Assert
            assert_eq!(state.selected, 0);
            assert_eq!(state.scroll_offset, 0);
            assert_eq!(state.hits.len(), 2);
        }

        #[test]
        fn drops_hits_without_a_path() {
            let mut state = listed_state(0);

            state.replace_hits(vec![hit("ghost", "", false), hit("real", "/real", false)]);

            assert_eq!(state.hits.len(), 1);
            assert_eq!(state.hits[0].name, "real");
        }

        #[test]
        fn selection_is_undefined_on_an_empty_set() {
            let mut state = listed_state(3);

            state.replace_hits(Vec::new());

            assert!(state.selected_hit().is_none());
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn down_wraps_back_to_the_first_row() {
            // Arrange
            let mut state = listed_state(3);
            let mut visited = Vec::new();

            // Act: one full lap
            for _ in 0..3 {
                visited.push(state.selected);
                state.move_selection_down();
            }

            // Assert
            assert_eq!(visited, vec![0, 1, 2]);
            assert_eq!(state.selected, 0);
        }

        #[test]
        fn up_from_the_first_row_wraps_to_the_last() {
            let mut state = listed_state(3);

            state.move_selection_up();

            assert_eq!(state.selected, 2);
        }

        #[test]
        fn moving_on_an_empty_set_is_inert() {
            let mut state = listed_state(0);

            state.move_selection_down();
            state.move_selection_up();

            assert_eq!(state.selected, 0);
            assert!(state.selected_hit().is_none());
        }
    }

    mod scrolling {
        use super::*;

        fn small_pane_state() -> LauncherState {
            // 7 rows leaves room for 4 list rows.
            let mut state = listed_state(10);
            state.last_rows = 7;
            state
        }

        #[test]
        fn moving_below_the_window_scrolls_down_minimally() {
            let mut state = small_pane_state();

            for _ in 0..4 {
                state.move_selection_down();
            }

            // Selection 4 with capacity 4 puts the window at offset 1.
            assert_eq!(state.selected, 4);
            assert_eq!(state.scroll_offset, 1);
        }

        #[test]
        fn moving_above_the_window_snaps_up_to_the_selection() {
            let mut state = small_pane_state();
            state.selected = 6;
            state.scroll_offset = 3;

            state.move_selection_up();
            state.move_selection_up();
            state.move_selection_up();
            state.move_selection_up();

            assert_eq!(state.selected, 2);
            assert_eq!(state.scroll_offset, 2);
        }

        #[test]
        fn moves_inside_the_window_do_not_scroll() {
            let mut state = small_pane_state();

            state.move_selection_down();
            state.move_selection_down();

            assert_eq!(state.scroll_offset, 0);
        }

        #[test]
        fn wrapping_to_the_last_row_scrolls_to_the_tail() {
            let mut state = small_pane_state();

            state.move_selection_up();

            assert_eq!(state.selected, 9);
            assert_eq!(state.scroll_offset, 6);
        }
    }

    mod click_mapping {
        use super::*;

        #[test]
        fn maps_list_lines_to_hit_indices() {
            let state = listed_state(5);

            assert_eq!(state.hit_index_at_line(LIST_TOP), Some(0));
            assert_eq!(state.hit_index_at_line(LIST_TOP + 2), Some(2));
        }

        #[test]
        fn accounts_for_the_scroll_offset() {
            let mut state = listed_state(10);
            state.last_rows = 7;
            state.selected = 5;
            state.scroll_offset = 2;

            assert_eq!(state.hit_index_at_line(LIST_TOP), Some(2));
        }

        #[test]
        fn rejects_chrome_rows_and_lines_past_the_list() {
            let state = listed_state(2);

            assert_eq!(state.hit_index_at_line(0), None);
            assert_eq!(state.hit_index_at_line(1), None);
            assert_eq!(state.hit_index_at_line(LIST_TOP + 2), None);
        }

        #[test]
        fn rejects_lines_below_the_window_capacity() {
            let mut state = listed_state(10);
            state.last_rows = 7;

            // Capacity is 4; line 4 of the list is off-screen.
            assert_eq!(state.hit_index_at_line(LIST_TOP + 4), None);
        }
    }

    mod viewmodel {
        use super::*;

        #[test]
        fn exactly_one_row_is_marked_selected() {
            let mut state = listed_state(5);
            state.selected = 3;

            let UiViewModel::Search(view) = state.compute_viewmodel(20, 80) else {
                panic!("expected the search view");
            };

            let marked: Vec<usize> = view
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row.selected)
                .map(|(index, _)| index)
                .collect();
            assert_eq!(marked, vec![3]);
        }

        #[test]
        fn directories_and_files_get_distinct_indicators() {
            let mut state = listed_state(0);
            state.replace_hits(vec![hit("docs", "/docs", true), hit("note", "/note", false)]);

            let UiViewModel::Search(view) = state.compute_viewmodel(20, 80) else {
                panic!("expected the search view");
            };

            assert_eq!(view.rows[0].indicator, 'd');
            assert_eq!(view.rows[1].indicator, '-');
        }

        #[test]
        fn markup_in_names_renders_as_literal_text() {
            let mut state = listed_state(0);
            state.replace_hits(vec![hit("<script>alert(1)</script>", "/tmp/x", false)]);

            let UiViewModel::Search(view) = state.compute_viewmodel(20, 80) else {
                panic!("expected the search view");
            };

            assert_eq!(view.rows[0].name, "<script>alert(1)</script>");
        }

        #[test]
        fn control_bytes_in_names_are_stripped() {
            let mut state = listed_state(0);
            state.replace_hits(vec![hit("\x1b[31mloud\x07", "/tmp/x", false)]);

            let UiViewModel::Search(view) = state.compute_viewmodel(20, 80) else {
                panic!("expected the search view");
            };

            assert_eq!(view.rows[0].name, "[31mloud");
        }

        #[test]
        fn empty_set_shows_the_help_panel() {
            let state = listed_state(0);

            let UiViewModel::Search(view) = state.compute_viewmodel(20, 80) else {
                panic!("expected the search view");
            };

            assert!(view.show_help);
            assert!(view.rows.is_empty());
        }

        #[test]
        fn querying_phase_shows_the_searching_note() {
            let mut state = listed_state(3);
            state.phase = Phase::Querying;

            let UiViewModel::Search(view) = state.compute_viewmodel(20, 80) else {
                panic!("expected the search view");
            };

            assert_eq!(view.status.as_deref(), Some("searching..."));
        }

        #[test]
        fn listing_status_shows_the_position() {
            let mut state = listed_state(5);
            state.selected = 2;

            let UiViewModel::Search(view) = state.compute_viewmodel(20, 80) else {
                panic!("expected the search view");
            };

            assert_eq!(view.status.as_deref(), Some("3/5"));
        }

        #[test]
        fn a_notice_outranks_the_position_status() {
            let mut state = listed_state(5);
            state.set_notice("Search timed out", Some(99));

            let UiViewModel::Search(view) = state.compute_viewmodel(20, 80) else {
                panic!("expected the search view");
            };

            assert_eq!(view.status.as_deref(), Some("Search timed out"));
        }

        #[test]
        fn long_paths_keep_their_tail() {
            let mut state = listed_state(0);
            let deep = format!("/very{}/target.txt", "/nested".repeat(30));
            state.replace_hits(vec![hit("target.txt", &deep, false)]);

            let UiViewModel::Search(view) = state.compute_viewmodel(20, 60) else {
                panic!("expected the search view");
            };

            assert!(view.rows[0].path.starts_with("..."));
            assert!(view.rows[0].path.ends_with("target.txt"));
        }

        #[test]
        fn the_window_follows_a_selection_past_capacity() {
            let mut state = listed_state(10);
            state.selected = 9;
            state.scroll_offset = 0;

            // 7 rows leaves 4 list rows; the stored offset predates the move.
            let UiViewModel::Search(view) = state.compute_viewmodel(7, 80) else {
                panic!("expected the search view");
            };

            assert_eq!(view.rows.len(), 4);
            assert!(view.rows[3].selected);
            assert_eq!(view.rows[3].name, "hit-9");
        }

        #[test]
        fn settings_mode_yields_the_form_view() {
            let mut state = listed_state(0);
            state.mode = Mode::Settings;
            state.settings.focused = 2;

            let UiViewModel::Settings(view) = state.compute_viewmodel(20, 80) else {
                panic!("expected the settings view");
            };

            assert_eq!(view.fields.len(), FIELD_COUNT);
            assert!(view.fields[2].focused);
            assert_eq!(view.fields[0].value, "7");
            assert_eq!(view.fields[2].value, "yes");
        }

        #[test]
        fn an_in_flight_save_shows_in_the_settings_status() {
            let mut state = listed_state(0);
            state.mode = Mode::Settings;
            state.settings.saving = true;

            let UiViewModel::Settings(view) = state.compute_viewmodel(20, 80) else {
                panic!("expected the settings view");
            };

            assert_eq!(view.status.as_deref(), Some("Saving..."));
        }
    }
}
