//! Review screen rendering
//!
//! Shows the analysis result with editable name/price/currency fields, the
//! category tag, the confidence score, and the low-confidence advisory.
//! Edits live in the transient review state; only confirmation persists.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{ReviewField, ReviewState};
use crate::view_state::AppViewState;
use crate::widgets::FieldEditor;

use super::helpers::format_confidence;
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_TAG, COLOR_WARNING,
};

pub fn render_review(frame: &mut Frame, view: &AppViewState) {
    let Some(review) = view.review else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // summary header
            Constraint::Length(3), // name field
            Constraint::Length(3), // price field
            Constraint::Length(3), // currency field
            Constraint::Length(2), // advisory / price error
            Constraint::Min(0),
            Constraint::Length(1), // controls
        ])
        .split(frame.area());

    render_summary(frame, chunks[0], review);
    render_field(frame, chunks[1], "Name", &review.name, review.focus == ReviewField::Name, false);
    render_field(
        frame,
        chunks[2],
        "Price",
        &review.price,
        review.focus == ReviewField::Price,
        review.price_invalid,
    );
    render_field(
        frame,
        chunks[3],
        "Currency",
        &review.currency,
        review.focus == ReviewField::Currency,
        false,
    );
    render_advisory(frame, chunks[4], view, review);

    let controls = Paragraph::new(Span::styled(
        "[enter] save item  [esc] discard  [tab] next field",
        Style::default().fg(COLOR_DIM),
    ));
    frame.render_widget(controls, chunks[6]);
}

fn render_summary(frame: &mut Frame, area: Rect, review: &ReviewState) {
    let frame_info = format!("{}x{} scan", review.frame.width, review.frame.height);
    let lines = vec![
        Line::from(vec![
            Span::styled(
                "Review scan",
                Style::default()
                    .fg(COLOR_HEADER)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  [{}]", review.result.category), Style::default().fg(COLOR_TAG)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("Confidence: {}", format_confidence(review.result.confidence_score)),
                Style::default().fg(COLOR_DIM),
            ),
            Span::styled(format!("  {}", frame_info), Style::default().fg(COLOR_DIM)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    editor: &FieldEditor,
    focused: bool,
    invalid: bool,
) {
    let border_color = if invalid {
        COLOR_ERROR
    } else if focused {
        COLOR_ACCENT
    } else {
        COLOR_BORDER
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(label);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(field_line(editor, focused)), inner);
}

/// Render the field content with a block cursor on the focused field.
fn field_line(editor: &FieldEditor, focused: bool) -> Line<'static> {
    if !focused {
        return Line::from(Span::raw(editor.content().to_string()));
    }

    let content = editor.content();
    let cursor = editor.cursor_position();
    let before: String = content.chars().take(cursor).collect();
    let at: String = content
        .chars()
        .nth(cursor)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = content.chars().skip(cursor + 1).collect();

    Line::from(vec![
        Span::raw(before),
        Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ])
}

fn render_advisory(frame: &mut Frame, area: Rect, view: &AppViewState, review: &ReviewState) {
    let mut lines = Vec::new();
    if review.price_invalid {
        lines.push(Line::from(Span::styled(
            "Price must be a non-negative number.",
            Style::default().fg(COLOR_ERROR),
        )));
    }
    if view.low_confidence() {
        lines.push(Line::from(Span::styled(
            "Confidence is low. Please verify the price matches the tag.",
            Style::default().fg(COLOR_WARNING),
        )));
    }
    if !lines.is_empty() {
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_line_unfocused_is_plain() {
        let editor = FieldEditor::with_content("abc");
        let line = field_line(&editor, false);
        assert_eq!(line.spans.len(), 1);
    }

    #[test]
    fn test_field_line_focused_splits_at_cursor() {
        let mut editor = FieldEditor::with_content("abc");
        editor.move_cursor_home();
        editor.move_cursor_right();
        let line = field_line(&editor, true);
        assert_eq!(line.spans[0].content.as_ref(), "a");
        assert_eq!(line.spans[1].content.as_ref(), "b");
        assert_eq!(line.spans[2].content.as_ref(), "c");
    }

    #[test]
    fn test_field_line_cursor_at_end_shows_space() {
        let editor = FieldEditor::with_content("x");
        let line = field_line(&editor, true);
        assert_eq!(line.spans[1].content.as_ref(), " ");
    }
}
