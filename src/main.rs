//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the zlauncher
//! library and the Zellij plugin system. It implements the `ZellijPlugin`
//! and `ZellijWorker` traits to handle Zellij events and lifecycle.
//!
//! # Architecture
//!
//! The plugin uses Zellij's worker thread support for background processing:
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ LauncherWorker   │   │  ← Scan, rank, storage
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! Zellij events are translated to library events:
//!
//! - `Key(char)` → `Event::Char` (query or form input by mode)
//! - `Key(Enter)` → `Event::Commit` with the modifier snapshot
//! - `Key(Esc)` → `Event::Escape`
//! - `Mouse(LeftClick)` → `Event::Click` on the clicked pane line
//! - `Mouse(ScrollUp/Down)` → selection movement
//! - `Timer` → `Event::TimerFired` (deadline comparison happens inside)
//! - `CustomMessage` → `Event::WorkerResponse`
//!
//! # Keybindings
//!
//! - type to search; `Backspace` edits
//! - `Up`/`Down`: move the selection (wraps at both ends)
//! - `Enter`: open; `Ctrl+Enter`: terminal here; `Shift+Enter`: show
//!   folder; `Alt+Enter`: copy path
//! - `Ctrl+,`: settings panel (`Tab`/`Up`/`Down` to move, `Space` to
//!   toggle, `Ctrl+S` save, `Ctrl+R` defaults, `Esc` back)
//! - `Esc`: close the launcher

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use zlauncher::domain::{LaunchAction, Modifiers, SearchHit};
use zlauncher::infrastructure::host_relative;
use zlauncher::worker::{LauncherWorker, WorkerMessage, WorkerResponse};
use zlauncher::{handle_event, Action, Config, Event, LauncherState};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(LauncherWorker, zlauncher_worker, ZLAUNCHER_WORKER);

/// Plugin state wrapper.
///
/// Wraps the library's `LauncherState` with Zellij-specific concerns like
/// worker addressing.
struct State {
    /// Core launcher state from the library layer.
    launcher: LauncherState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            launcher: zlauncher::initialize(&default_config),
            worker_name: "zlauncher".to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes tracing, builds the launcher
    /// state, requests permissions, and subscribes to events. The worker
    /// learns its scan scope only after permissions are granted.
    ///
    /// # Permissions
    ///
    /// - `RunCommands`: launch hits via host commands
    /// - `FullHdAccess`: walk the configured search roots
    /// - `OpenTerminalsOrPlugins`: the "terminal here" verb
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zlauncher::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!("plugin loading started");
        tracing::debug!(search_paths = ?config.search_paths, "parsed configuration");
        self.launcher = zlauncher::initialize(&config);
        tracing::debug!("launcher state initialized");

        tracing::debug!("requesting permissions");
        request_permission(&[
            PermissionType::RunCommands,
            PermissionType::FullHdAccess,
            PermissionType::OpenTerminalsOrPlugins,
        ]);

        tracing::debug!("subscribing to events");
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates Zellij events to library events, delegates to
    /// `handle_event` with the current clock, and executes the resulting
    /// actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        tracing::debug!(event = %event_name, "processing event");

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(ref mouse) => match map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::TimerFired,
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                self.handle_permission_result(permissions);
                return false;
            }
            _ => return false,
        };

        let now_ms = chrono::Utc::now().timestamp_millis();
        match handle_event(&mut self.launcher, &our_event, now_ms) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI.
    ///
    /// Records the pane size for click and scroll arithmetic, then
    /// delegates to the library's rendering layer.
    fn render(&mut self, rows: usize, cols: usize) {
        self.launcher.remember_size(rows, cols);
        zlauncher::ui::render(&self.launcher, rows, cols);
    }
}

/// Maps keyboard events to launcher events.
///
/// Mode-specific interpretation (query box versus settings form) happens in
/// the handler; this only turns chords into events.
fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
    tracing::debug!(bare_key = ?key.bare_key, "key event");

    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        match key.bare_key {
            BareKey::Char(',') => return Some(Event::ToggleSettings),
            BareKey::Char('s') => return Some(Event::Save),
            BareKey::Char('r') => return Some(Event::RestoreDefaults),
            _ => {}
        }
    }

    Some(match key.bare_key {
        BareKey::Down => Event::MoveDown,
        BareKey::Up => Event::MoveUp,
        BareKey::Tab => Event::FocusNext,
        BareKey::Enter => Event::Commit(modifier_snapshot(key)),
        BareKey::Esc => Event::Escape,
        BareKey::Backspace => Event::Backspace,
        BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
        _ => return None,
    })
}

/// Reads the modifier keys off a key event.
///
/// Super/Cmd counts as Ctrl so the terminal-here chord works on terminals
/// that swallow Ctrl+Enter.
fn modifier_snapshot(key: &KeyWithModifier) -> Modifiers {
    Modifiers {
        ctrl: key.key_modifiers.contains(&KeyModifier::Ctrl)
            || key.key_modifiers.contains(&KeyModifier::Super),
        shift: key.key_modifiers.contains(&KeyModifier::Shift),
        alt: key.key_modifiers.contains(&KeyModifier::Alt),
    }
}

/// Maps mouse events to launcher events.
fn map_mouse_event(mouse: &Mouse) -> Option<Event> {
    match mouse {
        Mouse::LeftClick(line, _col) => {
            let line = usize::try_from(*line).ok()?;
            Some(Event::Click { line })
        }
        Mouse::ScrollDown(_) => Some(Event::MoveDown),
        Mouse::ScrollUp(_) => Some(Event::MoveUp),
        _ => None,
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(..) => "Mouse".to_string(),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Handles permission request results.
    ///
    /// The worker cannot read plugin configuration, so the scan scope is
    /// forwarded to it here, once the filesystem is actually reachable.
    fn handle_permission_result(&self, permissions: PermissionStatus) {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - configuring worker");
                let scope = self.launcher.scope.clone();
                self.post_worker_message(&WorkerMessage::configure(
                    scope.roots,
                    scope.depth,
                    scope.max_results,
                ));
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - plugin functionality limited");
            }
        }
    }

    /// Maps custom message events to launcher events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message == self.worker_name {
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => {
                    tracing::debug!(response = ?response, "worker response received");
                    Some(Event::WorkerResponse(response))
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        } else {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            None
        }
    }

    /// Posts a message to the worker thread.
    ///
    /// Serializes the message as JSON and sends via Zellij's IPC system.
    /// Serialization errors are logged, not propagated; the transport is
    /// fire-and-forget either way.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls.
    ///
    /// # Actions
    ///
    /// - `Close`: hide the launcher pane
    /// - `StartTimer`: ask the host for a wake-up
    /// - `Launch`: perform a commit verb through host facilities
    /// - `PostToWorker`: send an IPC message to the worker thread
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::Close => {
                tracing::debug!("hiding launcher pane");
                hide_self();
            }
            Action::StartTimer { millis } => {
                #[allow(clippy::cast_precision_loss)]
                set_timeout(*millis as f64 / 1000.0);
            }
            Action::Launch { ref hit, verb } => {
                self.launch(hit, *verb);
            }
            Action::PostToWorker(ref message) => {
                tracing::debug!(message = ?message, "posting message to worker");
                self.post_worker_message(message);
            }
        }
    }

    /// Performs a commit verb on a hit.
    fn launch(&self, hit: &SearchHit, verb: LaunchAction) {
        tracing::info!(path = %hit.path, ?verb, "launching hit");

        match verb {
            LaunchAction::Open => {
                // desktop entries go through the application launcher so
                // their Exec line, icon, and environment apply
                if let Some(app_id) = desktop_app_id(&hit.path) {
                    run_command(&["gtk-launch", &app_id], BTreeMap::new());
                } else {
                    run_command(
                        &["xdg-open", &host_relative(&hit.path)],
                        BTreeMap::new(),
                    );
                }
            }
            LaunchAction::Terminal => {
                open_terminal(&containing_dir(hit));
            }
            LaunchAction::Folder => {
                let dir = containing_dir(hit);
                run_command(
                    &["xdg-open", &host_relative(&dir.to_string_lossy())],
                    BTreeMap::new(),
                );
            }
            LaunchAction::Copy => {
                // try the Wayland clipboard first, then the X11 tools; the
                // path travels as a positional argument, never spliced into
                // the script text
                let script = "printf %s \"$1\" | wl-copy 2>/dev/null \
                    || printf %s \"$1\" | xclip -selection clipboard 2>/dev/null \
                    || printf %s \"$1\" | xsel --input --clipboard";
                run_command(
                    &["sh", "-c", script, "copy-path", &strip_display_path(hit)],
                    BTreeMap::new(),
                );
            }
        }
    }
}

/// The application id of a `.desktop` hit, or `None` for ordinary files.
fn desktop_app_id(path: &str) -> Option<String> {
    let path = Path::new(path);
    if path.extension().is_some_and(|ext| ext == "desktop") {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
    } else {
        None
    }
}

/// The directory a verb like "terminal here" should land in: the hit itself
/// when it is a directory, its parent otherwise.
fn containing_dir(hit: &SearchHit) -> PathBuf {
    let path = Path::new(&hit.path);
    if hit.is_dir {
        path.to_path_buf()
    } else {
        path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }
}

/// The path as the user knows it, without the sandbox prefix. This is what
/// the copy verb puts on the clipboard.
fn strip_display_path(hit: &SearchHit) -> String {
    zlauncher::infrastructure::strip_host_prefix(&hit.path)
}
