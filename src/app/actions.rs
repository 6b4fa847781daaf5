//! Side effects requested by the event handler.
//!
//! This module defines the [`Action`] type, the imperative commands produced
//! by the pure event handler after processing input or worker pushes. The
//! handler never touches the Zellij API itself; it returns `Action` values
//! and the runtime in `main.rs` executes them in order. Tests drive the core
//! and assert on the returned actions instead of observing a live pane.
//!
//! # Example
//!
//! ```rust
//! use zlauncher::app::Action;
//! use zlauncher::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::search("fire".to_string(), 1)),
//!     Action::StartTimer { millis: 5_000 },
//! ];
//! ```

use crate::domain::{LaunchAction, SearchHit};
use crate::worker::WorkerMessage;

/// A side effect to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Posts a request to the background worker.
    ///
    /// Fire-and-forget: nothing blocks on a reply. Results and errors come
    /// back later as pushed events, if at all.
    PostToWorker(WorkerMessage),

    /// Performs a commit verb on a hit through host facilities: launch it,
    /// open a terminal or the file manager at its directory, or copy its
    /// path to the clipboard.
    Launch {
        /// The committed hit.
        hit: SearchHit,
        /// Which verb the modifiers selected.
        verb: LaunchAction,
    },

    /// Asks the host for a timer wake-up after `millis`.
    ///
    /// Host timers are anonymous and cannot be cancelled, so the handler
    /// treats every firing as a plain wake-up and compares the clock against
    /// the absolute deadlines stored in
    /// [`LauncherState`](crate::app::LauncherState). A wake-up that finds no
    /// deadline due is ignored.
    StartTimer {
        /// Delay before the wake-up, in milliseconds.
        millis: i64,
    },

    /// Hides the launcher pane.
    Close,
}
