//! Top-level rendering entry point.
//!
//! Rendering is a pure function of the state: the viewmodel computation in
//! the app layer does all the windowing and clipping, and the components
//! only place strings and colors. Nothing here mutates state.

use crate::app::LauncherState;
use crate::ui::components;
use crate::ui::viewmodel::UiViewModel;

/// Renders the pane to stdout.
///
/// The runtime calls [`LauncherState::remember_size`] before every frame so
/// the click mapping and scroll arithmetic in the state match what this
/// frame draws.
pub fn render(state: &LauncherState, rows: usize, cols: usize) {
    if rows == 0 || cols == 0 {
        return;
    }

    match state.compute_viewmodel(rows, cols) {
        UiViewModel::Search(view) => {
            components::render_search_view(&view, &state.theme, rows, cols);
        }
        UiViewModel::Settings(view) => {
            components::render_settings_view(&view, &state.theme, rows, cols);
        }
    }
}
