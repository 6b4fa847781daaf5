//! Zlauncher: a Zellij quick-launcher pane for files and applications.
//!
//! Zlauncher is a terminal multiplexer plugin that provides:
//! - Debounced as-you-type search over the configured directories
//! - Frecency-weighted ranking tuned by an in-pane settings panel
//! - Modifier-keyed commit verbs: open, terminal here, show folder, copy path
//! - Persistent usage history and weights backed by JSON file storage
//! - Scanning and ranking in a Zellij background worker

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Debounce/seq
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON I/O    │   │ - Scan        │
//! │ - Theming     │   │ - Frecency    │   │ - Rank        │
//! │ - Components  │   │ - Backend API │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Hits, verbs, weights (domain/)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: event handler, launcher state, and the action model
//! - [`domain`]: core types (hits, launch verbs, ranking weights, errors)
//! - [`infrastructure`]: sandbox path utilities
//! - [`storage`]: JSON persistence for usage history and weights
//! - [`worker`]: background scanning, ranking, and storage access
//! - [`ui`]: terminal rendering with theme support
//! - `observability`: OpenTelemetry tracing (internal)
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/zlauncher.wasm" {
//!         search_paths "~/Documents,~/Projects"
//!         search_depth "4"
//!         max_results "64"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Interaction Flow
//!
//! 1. **Plugin load** (`main.rs`): parse configuration, initialize tracing,
//!    build [`LauncherState`] with the resolved theme, request permissions.
//! 2. **Permission grant**: post a `Configure` message so the worker knows
//!    its scan scope.
//! 3. **Typing**: edits arm a quiet-period deadline; once it expires the
//!    pane posts a sequence-numbered `Search` to the worker.
//! 4. **Worker**: walks the configured roots, scores candidates against the
//!    weights and usage history, pushes back a capped result set.
//! 5. **Commit**: Enter (with optional modifiers) records the launch in the
//!    usage history, performs the verb, and hides the pane.
//!
//! # Examples
//!
//! ```rust
//! use zlauncher::{handle_event, initialize, Config, Event};
//!
//! let config = Config {
//!     search_paths: vec!["~/Documents".to_string()],
//!     search_depth: 3,
//!     ..Default::default()
//! };
//!
//! let mut state = initialize(&config);
//!
//! // Typing arms the debounce; the returned actions tell the runtime to
//! // start a host timer.
//! let (_render, actions) = handle_event(&mut state, &Event::Char('n'), 0)?;
//! assert!(!actions.is_empty());
//! # Ok::<(), zlauncher::LauncherError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, LauncherState, Mode, Phase};
pub use domain::{LaunchAction, LauncherError, Modifiers, RankingWeights, Result, SearchHit};
pub use ui::Theme;

use crate::infrastructure::expand_tilde;
use crate::worker::ScanScope;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/zlauncher.wasm" {
///     search_paths "~/Documents,~/Projects"
///     search_depth "4"
///     max_results "64"
///     theme "catppuccin-mocha"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directories to search, before tilde expansion.
    ///
    /// Default: `["~"]`.
    pub search_paths: Vec<String>,

    /// Maximum directory depth below each search root.
    ///
    /// Higher values scan deeper but take longer. Default: 4.
    pub search_depth: usize,

    /// Cap on hits per result set. Default: 64.
    pub max_results: usize,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over
    /// `theme_name`. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_paths: vec!["~".to_string()],
            search_depth: 4,
            max_results: 64,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization. Every value is optional; anything missing or
    /// malformed falls back to its default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zlauncher::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("search_paths".to_string(), "~/Documents,~/Code".to_string());
    /// map.insert("search_depth".to_string(), "5".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.search_paths, vec!["~/Documents", "~/Code"]);
    /// assert_eq!(config.search_depth, 5);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let search_paths = config
            .get("search_paths")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|v: &Vec<String>| !v.is_empty())
            .unwrap_or_else(|| vec!["~".to_string()]);

        let search_depth = config
            .get("search_depth")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(4);

        let max_results = config
            .get("max_results")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(64);

        Self {
            search_paths,
            search_depth,
            max_results,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// The scan scope forwarded to the worker: roots tilde-expanded into the
    /// sandbox, depth and result cap as configured.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zlauncher::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.scope().roots, vec!["/host"]);
    /// ```
    #[must_use]
    pub fn scope(&self) -> ScanScope {
        ScanScope {
            roots: self
                .search_paths
                .iter()
                .map(|path| expand_tilde(path))
                .collect(),
            depth: self.search_depth,
            max_results: self.max_results,
        }
    }
}

/// Builds the initial launcher state from configuration.
///
/// Resolves the theme (a `theme_file` wins over a `theme` name, anything
/// unresolvable falls back to the default) and pairs it with the scan scope.
/// The state starts idle; the worker learns its scope only after permissions
/// are granted.
///
/// # Example
///
/// ```rust
/// use zlauncher::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.selected_hit().is_none());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> LauncherState {
    tracing::debug!("initializing zlauncher plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(theme_file.clone()).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    LauncherState::new(theme, config.scope())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod from_zellij {
        use super::*;

        #[test]
        fn missing_keys_fall_back_to_defaults() {
            let config = Config::from_zellij(&BTreeMap::new());

            assert_eq!(config.search_paths, vec!["~"]);
            assert_eq!(config.search_depth, 4);
            assert_eq!(config.max_results, 64);
            assert!(config.theme_name.is_none());
        }

        #[test]
        fn unparsable_numbers_fall_back_to_defaults() {
            // Arrange
            let mut map = BTreeMap::new();
            map.insert("search_depth".to_string(), "deep".to_string());
            map.insert("max_results".to_string(), "-5".to_string());

            // Act
            let config = Config::from_zellij(&map);

            // Assert
            assert_eq!(config.search_depth, 4);
            assert_eq!(config.max_results, 64);
        }

        #[test]
        fn search_paths_split_on_commas_and_drop_blanks() {
            let mut map = BTreeMap::new();
            map.insert(
                "search_paths".to_string(),
                " ~/Documents , , ~/Code ".to_string(),
            );

            let config = Config::from_zellij(&map);

            assert_eq!(config.search_paths, vec!["~/Documents", "~/Code"]);
        }

        #[test]
        fn an_all_blank_paths_value_falls_back_to_home() {
            let mut map = BTreeMap::new();
            map.insert("search_paths".to_string(), " , ,".to_string());

            let config = Config::from_zellij(&map);

            assert_eq!(config.search_paths, vec!["~"]);
        }
    }

    mod scope {
        use super::*;

        #[test]
        fn roots_are_expanded_into_the_sandbox() {
            let config = Config {
                search_paths: vec!["~/Documents".to_string(), "/srv/shared".to_string()],
                search_depth: 2,
                max_results: 10,
                ..Default::default()
            };

            let scope = config.scope();

            assert_eq!(scope.roots, vec!["/host/Documents", "/srv/shared"]);
            assert_eq!(scope.depth, 2);
            assert_eq!(scope.max_results, 10);
        }
    }

    mod initialize {
        use super::*;

        #[test]
        fn an_unknown_theme_name_falls_back_to_the_default() {
            let config = Config {
                theme_name: Some("no-such-theme".to_string()),
                ..Default::default()
            };

            let state = initialize(&config);

            assert_eq!(state.theme, Theme::default());
        }
    }
}
