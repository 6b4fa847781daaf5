//! Footer hint bar.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders the keybinding hints centered on the given row, truncated on
/// narrow panes.
pub fn render_footer(row: usize, hints: &str, theme: &Theme, cols: usize) {
    let shown: String = hints.chars().take(cols).collect();
    let text_len = shown.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{shown}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
}
