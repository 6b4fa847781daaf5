//! Application layer: state, events, and the actions they produce.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the
//! domain/ui/worker layers. It is deliberately free of Zellij API calls:
//! inputs arrive as [`Event`] values, [`handle_event`] mutates
//! [`LauncherState`], and side effects leave as [`Action`] values for the
//! runtime to execute. Tests drive the whole interaction with a fake clock.
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the event handler
//! - [`handler`]: the event handler and state machine
//! - [`modes`]: interaction phase and pane mode types
//! - [`settings`]: field-level state of the ranking-weights form
//! - [`state`]: the central state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod settings;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Mode, Phase};
pub use settings::SettingsForm;
pub use state::{LauncherState, Notice};
