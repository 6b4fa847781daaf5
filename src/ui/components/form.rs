//! Ranking-weights form renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SettingsView;

/// Label column width; labels longer than this are the form's problem.
const LABEL_WIDTH: usize = 24;

/// Renders the settings panel title row.
pub fn render_form_title(row: usize, theme: &Theme, cols: usize) {
    let title = "ranking weights";
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.prompt_fg));
    print!("> {title}");
    print!("{}", " ".repeat(cols.saturating_sub(2 + title.len())));
    print!("{}", Theme::reset());
}

/// Renders the form rows starting at `start_row` (1-indexed), blanking the
/// remaining rows down to `last_row` exclusive.
pub fn render_form(start_row: usize, view: &SettingsView, theme: &Theme, last_row: usize, cols: usize) {
    let mut current = start_row;
    for field in &view.fields {
        if current >= last_row {
            break;
        }
        position_cursor(current, 1);

        if field.focused {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
            print!(" > ");
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
            print!("   ");
        }

        print!("{:<LABEL_WIDTH$}", field.label);

        if field.is_toggle && !field.focused {
            print!("{}", Theme::fg(&theme.colors.status_fg));
        }
        let cursor = if field.focused && !field.is_toggle { "\u{2588}" } else { "" };
        print!("{}{cursor}", field.value);

        let used = 3 + LABEL_WIDTH + field.value.chars().count() + cursor.chars().count();
        print!("{}", " ".repeat(cols.saturating_sub(used)));
        print!("{}", Theme::reset());
        current += 1;
    }

    for row in current..last_row {
        position_cursor(row, 1);
        print!("{}", " ".repeat(cols));
    }
}
