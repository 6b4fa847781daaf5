//! Result list renderer.
//!
//! One row per visible hit: the directory indicator, the name column, and
//! the path in dim text. The selected row is inverted with the theme's
//! selection colors across the full pane width.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HitRow, NAME_WIDTH};

/// Renders the visible window of the result list starting at `start_row`
/// (1-indexed), blanking unused rows down to `last_row` exclusive.
pub fn render_list(start_row: usize, rows: &[HitRow], theme: &Theme, last_row: usize, cols: usize) {
    let mut current = start_row;
    for hit in rows {
        render_row(current, hit, theme, cols);
        current += 1;
    }
    for row in current..last_row {
        position_cursor(row, 1);
        print!("{}", " ".repeat(cols));
    }
}

fn render_row(row: usize, hit: &HitRow, theme: &Theme, cols: usize) {
    position_cursor(row, 1);

    if hit.selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }

    if hit.selected {
        print!(" {} ", hit.indicator);
    } else if hit.indicator == 'd' {
        print!(" {}{} {}", Theme::fg(&theme.colors.dir_fg), hit.indicator, Theme::fg(&theme.colors.text_normal));
    } else {
        print!(" {}{} ", Theme::fg(&theme.colors.text_dim), hit.indicator);
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!("{:<NAME_WIDTH$}", hit.name);
    print!("  ");

    if !hit.selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", hit.path);

    // 1 + indicator + 1 + name + 2 gap
    let used = 3 + NAME_WIDTH + 2 + hit.path.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
}
