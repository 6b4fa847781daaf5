//! Composable renderers for the pane's surfaces.
//!
//! Each component draws one region of the frame with `position_cursor` and
//! `print!`, padding every line to the full pane width so stale content from
//! the previous frame never bleeds through. The layout mirrors the 0-based
//! pane lines the click mapping uses: query on line 0, status on line 1, the
//! list (or help panel, or weights form) below, and the footer on the last
//! line.

mod footer;
mod form;
mod help;
mod list;
mod query;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchView, SettingsView, LIST_TOP};

use footer::render_footer;
use form::{render_form, render_form_title};
use help::render_help;
use list::render_list;
use query::{render_query_row, render_status_row};

/// Renders the search surface: query, status, list or help, footer.
pub fn render_search_view(view: &SearchView, theme: &Theme, rows: usize, cols: usize) {
    render_query_row(1, &view.query, theme, cols);
    render_status_row(2, view.status.as_deref(), theme, cols);

    let list_start = LIST_TOP + 1; // pane line to 1-indexed ANSI row
    if view.show_help {
        render_help(list_start, theme, rows.saturating_sub(1), cols);
    } else {
        render_list(list_start, &view.rows, theme, rows.saturating_sub(1), cols);
    }

    render_footer(rows, &view.footer, theme, cols);
}

/// Renders the settings surface: title, form fields, status, footer.
pub fn render_settings_view(view: &SettingsView, theme: &Theme, rows: usize, cols: usize) {
    render_form_title(1, theme, cols);
    render_status_row(2, view.status.as_deref(), theme, cols);
    render_form(LIST_TOP + 1, view, theme, rows.saturating_sub(1), cols);
    render_footer(rows, &view.footer, theme, cols);
}
