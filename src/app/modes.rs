//! Interaction phase and pane mode types.
//!
//! The launcher runs a small state machine per interaction: the pane idles
//! with a help panel, enters a querying phase while a search is debounced or
//! in flight, and lists results once a set arrives. Orthogonally the pane is
//! either in the search view or in the ranking-weights settings panel.

/// Lifecycle of the current query.
///
/// Transitions are driven by [`handle_event`](crate::app::handle_event):
///
/// - an edit with non-empty trimmed text arms the debounce and enters
///   [`Querying`](Phase::Querying);
/// - a result push carrying the current sequence number enters
///   [`Listing`](Phase::Listing), or falls back to [`Idle`](Phase::Idle)
///   when it carried no hits;
/// - clearing the query, a search timeout, Escape, or a commit all reset
///   to [`Idle`](Phase::Idle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No search pending and nothing to list; the help panel shows.
    #[default]
    Idle,

    /// A debounce deadline is armed or a dispatched search awaits its
    /// response. Rows from the previous set stay visible meanwhile.
    Querying,

    /// The latest result set is on screen with one row selected.
    Listing,
}

/// Which surface of the pane currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The query box and result list.
    #[default]
    Search,

    /// The ranking-weights form.
    Settings,
}
