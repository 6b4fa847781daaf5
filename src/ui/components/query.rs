//! Query and status row renderers.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders the query row: a prompt, the typed text, and a block cursor.
pub fn render_query_row(row: usize, query: &str, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.prompt_fg));
    print!("> ");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{query}");
    print!("{}", Theme::fg(&theme.colors.prompt_fg));
    print!("\u{2588}");

    let used = 2 + query.chars().count() + 1;
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
}

/// Renders the status row below the query, blank when there is no status.
pub fn render_status_row(row: usize, status: Option<&str>, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    match status {
        Some(text) => {
            print!("{}", Theme::fg(&theme.colors.status_fg));
            print!("  {text}");
            print!("{}", " ".repeat(cols.saturating_sub(2 + text.chars().count())));
            print!("{}", Theme::reset());
        }
        None => print!("{}", " ".repeat(cols)),
    }
}
