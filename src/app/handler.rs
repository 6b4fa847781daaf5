//! Event handling and state transitions.
//!
//! This is the launcher's state machine. Every input — keystrokes, mouse,
//! timer wake-ups, worker pushes — arrives as an [`Event`] together with the
//! current clock, mutates [`LauncherState`], and yields the [`Action`]s the
//! runtime must perform. The handler itself never touches the Zellij API,
//! which is what makes the whole interaction testable with a fake clock and
//! no pane.
//!
//! # Query lifecycle
//!
//! An edit with non-empty trimmed text arms the 100 ms debounce deadline and
//! enters `Querying`. A timer wake-up at or past the deadline increments the
//! sequence number, posts the search, and arms the response timeout. The
//! matching result push enters `Listing` (or falls back to `Idle` with a
//! "no matches" note); a push with a stale sequence number is discarded.
//! Clearing the box empties everything synchronously and posts nothing.

use crate::app::actions::Action;
use crate::app::modes::{Mode, Phase};
use crate::app::state::{
    LauncherState, ERROR_NOTICE_MS, QUIET_PERIOD_MS, SAVED_NOTICE_MS, SEARCH_TIMEOUT_MS,
};
use crate::domain::error::Result;
use crate::domain::weights::RankingWeights;
use crate::domain::{LaunchAction, Modifiers};
use crate::worker::{WorkerMessage, WorkerResponse};

/// An input to the state machine.
///
/// The runtime translates raw Zellij events into these; tests construct
/// them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A printable character was typed.
    Char(char),
    /// Backspace.
    Backspace,
    /// Arrow down, or a wheel scroll down.
    MoveDown,
    /// Arrow up, or a wheel scroll up.
    MoveUp,
    /// Tab: next settings field.
    FocusNext,
    /// Enter, with the modifier keys read at the moment of the event.
    Commit(Modifiers),
    /// Escape.
    Escape,
    /// Ctrl+, — flip between the search view and the weights panel.
    ToggleSettings,
    /// Ctrl+S in the weights panel.
    Save,
    /// Ctrl+R in the weights panel: refill the form with defaults.
    RestoreDefaults,
    /// Left click on a pane line (0-based from the top).
    Click {
        /// The clicked pane line.
        line: usize,
    },
    /// A host timer fired. Carries no payload; the handler compares the
    /// clock against the armed deadlines.
    TimerFired,
    /// A push from the background worker.
    WorkerResponse(WorkerResponse),
}

/// Processes one event against the state and returns `(should_render,
/// actions)`.
///
/// `now_ms` is the wall clock in epoch millis; it enters as a parameter so
/// deadlines are decided by the caller's clock, not an ambient one.
///
/// # Errors
///
/// Reserved for state mutations that can fail; the current transitions are
/// all infallible.
pub fn handle_event(
    state: &mut LauncherState,
    event: &Event,
    now_ms: i64,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::TimerFired => Ok(wake(state, now_ms)),
        Event::WorkerResponse(response) => Ok(on_worker_response(state, response, now_ms)),
        _ => match state.mode {
            Mode::Search => Ok(on_search_event(state, event, now_ms)),
            Mode::Settings => Ok(on_settings_event(state, event)),
        },
    }
}

fn on_search_event(state: &mut LauncherState, event: &Event, now_ms: i64) -> (bool, Vec<Action>) {
    match event {
        Event::Char(c) => {
            state.query.push(*c);
            query_edited(state, now_ms)
        }
        Event::Backspace => {
            state.query.pop();
            query_edited(state, now_ms)
        }
        Event::MoveDown => {
            state.move_selection_down();
            (true, vec![])
        }
        Event::MoveUp => {
            state.move_selection_up();
            (true, vec![])
        }
        Event::Commit(mods) => commit_selection(state, *mods),
        Event::Click { line } => {
            let Some(index) = state.hit_index_at_line(*line) else {
                return (false, vec![]);
            };
            state.selected = index;
            // a click commits with no modifiers
            commit_selection(state, Modifiers::default())
        }
        Event::Escape => {
            tracing::debug!("closing launcher");
            state.reset_interaction();
            (true, vec![Action::Close])
        }
        Event::ToggleSettings => {
            state.mode = Mode::Settings;
            state.notice = None;
            (
                true,
                vec![Action::PostToWorker(WorkerMessage::load_weights())],
            )
        }
        Event::FocusNext | Event::Save | Event::RestoreDefaults => (false, vec![]),
        Event::TimerFired | Event::WorkerResponse(_) => unreachable!("handled in handle_event"),
    }
}

/// The query buffer changed: either clear synchronously or re-arm the
/// debounce.
fn query_edited(state: &mut LauncherState, now_ms: i64) -> (bool, Vec<Action>) {
    state.notice = None;

    if state.query.trim().is_empty() {
        tracing::debug!("query cleared, emptying result set");
        state.hits.clear();
        state.selected = 0;
        state.scroll_offset = 0;
        state.phase = Phase::Idle;
        state.debounce_due_at = None;
        state.timeout_due_at = None;
        // a late response to the old query must not repopulate the box
        state.seq += 1;
        return (true, vec![]);
    }

    state.phase = Phase::Querying;
    state.debounce_due_at = Some(now_ms + QUIET_PERIOD_MS);
    // the edit supersedes any in-flight search, so its timeout must not fire
    state.timeout_due_at = None;
    (
        true,
        vec![Action::StartTimer {
            millis: QUIET_PERIOD_MS,
        }],
    )
}

/// Commits the current selection with the given modifier snapshot.
///
/// The execute request and the launch both reference the selected hit by
/// path; the launcher then hides and resets, matching hide-after-launch.
fn commit_selection(state: &mut LauncherState, mods: Modifiers) -> (bool, Vec<Action>) {
    let Some(hit) = state.selected_hit().cloned() else {
        return (false, vec![]);
    };

    let verb = LaunchAction::from_modifiers(mods);
    tracing::info!(path = %hit.path, ?verb, "committing selection");

    let actions = vec![
        Action::PostToWorker(WorkerMessage::execute(hit.path.clone(), verb)),
        Action::Launch { hit, verb },
        Action::Close,
    ];
    state.reset_interaction();
    (true, actions)
}

fn on_settings_event(state: &mut LauncherState, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::Char(' ') => {
            state.settings.toggle();
            (true, vec![])
        }
        Event::Char(c) => {
            state.settings.insert_char(*c);
            (true, vec![])
        }
        Event::Backspace => {
            state.settings.backspace();
            (true, vec![])
        }
        Event::MoveDown | Event::FocusNext => {
            state.settings.focus_next();
            (true, vec![])
        }
        Event::MoveUp => {
            state.settings.focus_prev();
            (true, vec![])
        }
        Event::Commit(_) => {
            // Enter toggles boolean fields, nothing else
            state.settings.toggle();
            (true, vec![])
        }
        Event::Save => {
            if state.settings.saving {
                tracing::debug!("save already in flight, ignoring");
                return (false, vec![]);
            }
            let weights = state.settings.collect();
            tracing::info!(?weights, "saving ranking weights");
            state.settings.saving = true;
            (
                true,
                vec![Action::PostToWorker(WorkerMessage::save_weights(weights))],
            )
        }
        Event::RestoreDefaults => {
            state.settings.load(&RankingWeights::default());
            (true, vec![])
        }
        Event::Escape | Event::ToggleSettings => {
            state.mode = Mode::Search;
            state.notice = None;
            (true, vec![])
        }
        Event::Click { .. } => (false, vec![]),
        Event::TimerFired | Event::WorkerResponse(_) => unreachable!("handled in handle_event"),
    }
}

/// A timer fired. Timers are anonymous wake-ups: check each armed deadline
/// against the clock and act on whichever is due.
fn wake(state: &mut LauncherState, now_ms: i64) -> (bool, Vec<Action>) {
    let mut render = false;
    let mut actions = Vec::new();

    if state.debounce_due_at.is_some_and(|due| now_ms >= due) {
        state.debounce_due_at = None;
        state.seq += 1;
        state.timeout_due_at = Some(now_ms + SEARCH_TIMEOUT_MS);
        tracing::debug!(seq = state.seq, query = %state.query, "debounce expired, dispatching search");
        actions.push(Action::PostToWorker(WorkerMessage::search(
            state.query.clone(),
            state.seq,
        )));
        actions.push(Action::StartTimer {
            millis: SEARCH_TIMEOUT_MS,
        });
        render = true;
    } else if state.timeout_due_at.is_some_and(|due| now_ms >= due) {
        state.timeout_due_at = None;
        if state.phase == Phase::Querying {
            tracing::warn!(seq = state.seq, "search timed out");
            state.hits.clear();
            state.selected = 0;
            state.scroll_offset = 0;
            state.phase = Phase::Idle;
            // discard the response if it ever shows up
            state.seq += 1;
            state.set_notice("Search timed out", Some(now_ms + ERROR_NOTICE_MS));
            actions.push(Action::StartTimer {
                millis: ERROR_NOTICE_MS,
            });
            render = true;
        }
    }

    if state
        .notice
        .as_ref()
        .and_then(|notice| notice.clear_due_at)
        .is_some_and(|due| now_ms >= due)
    {
        state.notice = None;
        render = true;
    }

    (render, actions)
}

fn on_worker_response(
    state: &mut LauncherState,
    response: &WorkerResponse,
    now_ms: i64,
) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::Results { seq, hits } => {
            if *seq != state.seq {
                tracing::debug!(got = seq, current = state.seq, "discarding stale result set");
                return (false, vec![]);
            }
            state.timeout_due_at = None;
            state.replace_hits(hits.clone());
            if state.hits.is_empty() {
                state.phase = Phase::Idle;
                state.set_notice("no matches", None);
            } else {
                state.phase = Phase::Listing;
                state.notice = None;
            }
            tracing::debug!(seq, hit_count = state.hits.len(), "result set installed");
            (true, vec![])
        }
        WorkerResponse::Weights { weights } => {
            state.settings.load(weights);
            (state.mode == Mode::Settings, vec![])
        }
        WorkerResponse::WeightsSaved {} => {
            state.settings.saving = false;
            state.set_notice("Saved", Some(now_ms + SAVED_NOTICE_MS));
            (
                true,
                vec![Action::StartTimer {
                    millis: SAVED_NOTICE_MS,
                }],
            )
        }
        WorkerResponse::AccessRecorded { path } => {
            tracing::debug!(path = %path, "usage history bumped");
            (false, vec![])
        }
        WorkerResponse::Error { operation, message } => {
            tracing::warn!(operation = %operation, message = %message, "worker reported an error");
            match operation.as_str() {
                "save_weights" => {
                    state.settings.saving = false;
                    state.set_notice("Failed to save", Some(now_ms + ERROR_NOTICE_MS));
                    (
                        true,
                        vec![Action::StartTimer {
                            millis: ERROR_NOTICE_MS,
                        }],
                    )
                }
                // load failures keep the defaults silently; search failures
                // are indistinguishable from a slow search and time out
                _ => (false, vec![]),
            }
        }
    }
}
