//! Renderable representations of the launcher state.
//!
//! View models are computed by
//! [`LauncherState::compute_viewmodel`](crate::app::LauncherState::compute_viewmodel)
//! and consumed by the renderer. They carry display-ready strings only: all
//! windowing, clipping, and sanitization has already happened, so the
//! renderer's job is placing text and colors.

/// First list row, as a 0-based pane line.
///
/// Line 0 is the query row and line 1 the status row; the result list starts
/// below them. Click mapping and scroll arithmetic both count from here.
pub const LIST_TOP: usize = 2;

/// Width of the name column.
///
/// Shared between the viewmodel's clipping and the list renderer's padding
/// so the two cannot drift apart.
pub const NAME_WIDTH: usize = 28;

/// How many result rows fit in a pane of the given height.
///
/// The list owns everything between the two chrome rows at the top and the
/// footer at the bottom.
#[must_use]
pub fn list_capacity(rows: usize) -> usize {
    rows.saturating_sub(LIST_TOP + 1)
}

/// What the pane should draw this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiViewModel {
    /// The query box and result list (or the help panel).
    Search(SearchView),

    /// The ranking-weights form.
    Settings(SettingsView),
}

/// The search surface: query echo, status line, and the visible window of
/// the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    /// The query text, sanitized for terminal output.
    pub query: String,

    /// Status line content: a transient notice, the searching note, or the
    /// selection position. `None` renders an empty row.
    pub status: Option<String>,

    /// Visible result rows, already windowed to the pane height.
    pub rows: Vec<HitRow>,

    /// Show the help panel instead of the list (the set is empty).
    pub show_help: bool,

    /// Keybinding hints for the bottom row.
    pub footer: String,
}

/// One visible result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRow {
    /// `d` for directories, `-` for everything else.
    pub indicator: char,

    /// Display name, sanitized and clipped to the name column.
    pub name: String,

    /// Path, sanitized and tail-clipped to the remaining width.
    pub path: String,

    /// Exactly one row per frame carries this.
    pub selected: bool,
}

/// The settings surface: the eight weight fields plus save state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    /// Form rows in display order.
    pub fields: Vec<FieldRow>,

    /// Status line: a transient notice or the in-flight save note.
    pub status: Option<String>,

    /// A save is in flight; the form renders its save hint dimmed.
    pub saving: bool,

    /// Keybinding hints for the bottom row.
    pub footer: String,
}

/// One row of the weights form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    /// Field label.
    pub label: &'static str,

    /// Display value: the edit buffer for numeric fields, `yes`/`no` for
    /// toggles.
    pub value: String,

    /// The cursor is on this field.
    pub focused: bool,

    /// Boolean field, toggled rather than typed into.
    pub is_toggle: bool,
}
