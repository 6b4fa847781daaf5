//! Idle help panel.
//!
//! Shown whenever the result set is empty: before the first query, after
//! clearing the box, and when a search matched nothing. Lists the four
//! commit verbs and the close key.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

const HELP_LINES: [&str; 7] = [
    "type to search files and applications",
    "",
    "Enter        open",
    "Ctrl+Enter   terminal here",
    "Shift+Enter  show folder",
    "Alt+Enter    copy path",
    "Esc          close",
];

/// Renders the help panel starting at `start_row` (1-indexed), blanking the
/// remaining rows down to `last_row` exclusive.
pub fn render_help(start_row: usize, theme: &Theme, last_row: usize, cols: usize) {
    let mut current = start_row + 1;
    for line in HELP_LINES {
        if current >= last_row {
            break;
        }
        position_cursor(current, 1);
        print!("{}", Theme::fg(&theme.colors.help_fg));
        print!("   {line}");
        print!("{}", " ".repeat(cols.saturating_sub(3 + line.len())));
        print!("{}", Theme::reset());
        current += 1;
    }

    position_cursor(start_row, 1);
    print!("{}", " ".repeat(cols));
    for row in current..last_row {
        position_cursor(row, 1);
        print!("{}", " ".repeat(cols));
    }
}
