//! Capture screen rendering
//!
//! A framing guide while the camera is live, a spinner while the device is
//! being opened, and a blocking error panel when access fails.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::app::CaptureStatus;
use crate::traits::FacingMode;
use crate::view_state::AppViewState;

use super::helpers::{centered_rect, spinner_frame};
use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};

pub fn render_capture(frame: &mut Frame, view: &AppViewState) {
    match view.capture_status {
        CaptureStatus::Failed(message) => render_camera_error(frame, message),
        CaptureStatus::Opening => render_opening(frame, view),
        _ => render_viewfinder(frame, view),
    }
}

fn render_opening(frame: &mut Frame, view: &AppViewState) {
    let facing = match view.facing {
        FacingMode::Back => "back",
        FacingMode::Front => "front",
    };
    let area = centered_rect(40, 3, frame.area());
    let text = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(spinner_frame(view.tick_count), Style::default().fg(COLOR_ACCENT)),
            Span::raw(format!(" Opening {} camera...", facing)),
        ]),
        Line::from(Span::styled(
            "[esc] cancel",
            Style::default().fg(COLOR_DIM),
        )),
    ])
    .centered();
    frame.render_widget(text, area);
}

fn render_viewfinder(frame: &mut Frame, view: &AppViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(5),    // guide
            Constraint::Length(1), // controls
        ])
        .split(frame.area());

    let title = Paragraph::new(Span::styled(
        "Scan Price Tag",
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    ))
    .centered();
    frame.render_widget(title, chunks[0]);

    // Framing guide: keep the tag inside the box.
    let guide_area = centered_rect(
        chunks[1].width.saturating_sub(8).max(20),
        chunks[1].height.saturating_sub(2).max(5),
        chunks[1],
    );
    let guide = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_ACCENT));
    let inner = guide.inner(guide_area);
    frame.render_widget(guide, guide_area);

    let hint = Paragraph::new(Span::styled(
        "Center the price tag in the frame",
        Style::default().fg(COLOR_DIM),
    ))
    .centered();
    frame.render_widget(hint, centered_rect(inner.width, 1, inner));

    let controls = Paragraph::new(Span::styled(
        "[space] capture  [r] switch camera  [esc] cancel",
        Style::default().fg(COLOR_DIM),
    ))
    .centered();
    frame.render_widget(controls, chunks[2]);
}

fn render_camera_error(frame: &mut Frame, message: &str) {
    let area = centered_rect(54, 6, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ERROR))
        .title("Camera error");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let body = Paragraph::new(vec![
        Line::from(Span::styled(
            "Unable to access camera. Please ensure permissions are granted.",
            Style::default().fg(COLOR_ERROR),
        )),
        Line::from(Span::styled(message, Style::default().fg(COLOR_DIM))),
        Line::default(),
        Line::from(Span::styled("[esc] close", Style::default().fg(COLOR_DIM))),
    ])
    .wrap(ratatui::widgets::Wrap { trim: true });
    frame.render_widget(body, inner);
}
