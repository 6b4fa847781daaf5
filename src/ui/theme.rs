//! Color schemes and ANSI escape sequence generation.
//!
//! Themes are TOML color tables, either one of the built-in Catppuccin
//! variants or a user file pointed at by the `theme_file` plugin setting.
//! Colors are hex strings turned into 24-bit ANSI sequences at render time.
//!
//! # TOML format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! prompt_fg = "#f5c2e7"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! dir_fg = "#89b4fa"
//! status_fg = "#f9e2af"
//! help_fg = "#89b4fa"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{LauncherError, Result};

/// Color scheme for the pane.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette.
    pub colors: ThemeColors,
}

/// Color definitions, all hex strings (`#rrggbb`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Query prompt and focused form field accent.
    pub prompt_fg: String,

    /// Selected row foreground.
    pub selection_fg: String,
    /// Selected row background.
    pub selection_bg: String,

    /// Normal text.
    pub text_normal: String,
    /// Dimmed text (footer, paths, secondary info).
    pub text_dim: String,

    /// Directory indicator column.
    pub dir_fg: String,

    /// Status line (notices, searching note, selection position).
    pub status_fg: String,

    /// Help panel text.
    pub help_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Ships `catppuccin-mocha` (the default) and `catppuccin-latte`.
    /// Returns `None` for unknown names so the caller can fall back.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::Theme`] when the file cannot be read or the
    /// TOML is missing required color fields.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LauncherError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| LauncherError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses a hex color, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        // byte-length check alone is not enough: slicing a multibyte
        // string from a user theme file would panic
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape sequence for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// ANSI bold.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// ANSI dim.
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// ANSI reset.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the bundled theme fails to parse, which cannot happen for a
    /// theme compiled into the binary.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}
