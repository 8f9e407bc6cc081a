//! UI rendering for PriceLens
//!
//! Four screens driven by the view state: the dashboard (default), the
//! camera capture view, the analyzing busy state, and the result review.
//! All renderers are pure functions of [`AppViewState`]; the delete
//! confirmation renders as an overlay on top of the dashboard.

mod analyzing;
mod capture;
mod dashboard;
mod helpers;
mod review;
mod theme;

// Re-export theme colors for external use
pub use theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_TAG, COLOR_VALUE,
    COLOR_WARNING,
};

// Re-export helper functions for external use
pub use helpers::{format_confidence, format_price, spinner_frame, truncate_string};

use ratatui::Frame;

use crate::app::{App, Screen};
use crate::view_state::AppViewState;

/// Render the UI based on the current screen
pub fn render(frame: &mut Frame, app: &App) {
    let view = AppViewState::from_app(app);

    match view.screen {
        Screen::Dashboard => dashboard::render_dashboard(frame, &view),
        Screen::Capture => capture::render_capture(frame, &view),
        Screen::Analyzing => analyzing::render_analyzing(frame, &view),
        Screen::Review => review::render_review(frame, &view),
    }

    // Delete confirmation overlay (dashboard only).
    if view.screen == Screen::Dashboard {
        dashboard::render_delete_modal(frame, &view);
    }
}
