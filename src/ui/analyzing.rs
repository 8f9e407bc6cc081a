//! Analyzing screen rendering
//!
//! Full-screen busy state while the inference call is in flight. No input
//! is accepted here apart from quitting, which is what keeps duplicate
//! requests from being issued.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::view_state::AppViewState;

use super::helpers::{centered_rect, spinner_frame};
use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_HEADER};

pub fn render_analyzing(frame: &mut Frame, view: &AppViewState) {
    let area = centered_rect(56, 4, frame.area());

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            spinner_frame(view.tick_count),
            Style::default().fg(COLOR_ACCENT),
        )),
        Line::from(Span::styled(
            "Analyzing Product",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Identifying item and extracting price details with Gemini Vision...",
            Style::default().fg(COLOR_DIM),
        )),
    ])
    .centered();
    frame.render_widget(text, area);
}
