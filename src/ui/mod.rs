//! Terminal rendering layer.
//!
//! The app layer computes a [`viewmodel`] from the launcher state; this
//! layer turns it into ANSI output. The split keeps everything with logic in
//! it (windowing, clipping, sanitization, selection marking) off the display
//! path and therefore unit-testable without a terminal.
//!
//! # Modules
//!
//! - [`viewmodel`]: Renderable state representations and layout constants
//! - [`renderer`]: Top-level render entry point
//! - [`components`]: Per-region renderers (query, list, help, form, footer)
//! - [`helpers`]: Sanitization, clipping, and cursor positioning
//! - [`theme`]: TOML color schemes and ANSI sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{FieldRow, HitRow, SearchView, SettingsView, UiViewModel};
