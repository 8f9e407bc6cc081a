//! Dashboard screen rendering
//!
//! Header with the preferred-currency selector, the total-value card with
//! the price trend sparkline, the recent-scans list, and the
//! delete-confirmation modal.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Sparkline};
use ratatui::Frame;

use crate::currency::currency_by_code;
use crate::view_state::AppViewState;

use super::helpers::{centered_rect, format_price, truncate_string};
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_TAG, COLOR_VALUE,
};

pub fn render_dashboard(frame: &mut Frame, view: &AppViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Length(6), // total value card
            Constraint::Min(3),    // recent scans
            Constraint::Length(1), // alert / keybinds
        ])
        .split(frame.area());

    render_header(frame, chunks[0], view);
    render_total_card(frame, chunks[1], view);
    render_item_list(frame, chunks[2], view);
    render_footer(frame, chunks[3], view);
}

fn render_header(frame: &mut Frame, area: Rect, view: &AppViewState) {
    let currency = currency_by_code(&view.preference.currency);
    let line = Line::from(vec![
        Span::styled(
            "PriceLens",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Track your findings", Style::default().fg(COLOR_DIM)),
        Span::raw("  "),
        Span::styled(
            format!("[{} ({})]", currency.code, currency.symbol),
            Style::default().fg(COLOR_ACCENT),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_total_card(frame: &mut Frame, area: Rect, view: &AppViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title("Total Tracked Value");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let total = Paragraph::new(Line::from(Span::styled(
        format!(
            "{}{}",
            view.dashboard.symbol,
            format_price(view.dashboard.total_value)
        ),
        Style::default()
            .fg(COLOR_VALUE)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(total, rows[0]);

    if view.dashboard.has_trend() {
        let sparkline = Sparkline::default()
            .data(&view.dashboard.trend)
            .style(Style::default().fg(COLOR_ACCENT));
        frame.render_widget(sparkline, rows[1]);
    } else {
        let hint = Paragraph::new(Span::styled(
            "Add more items to see trends",
            Style::default()
                .fg(COLOR_DIM)
                .add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(hint, rows[1]);
    }
}

fn render_item_list(frame: &mut Frame, area: Rect, view: &AppViewState) {
    let title = format!("Recent Scans ({} items)", view.dashboard.item_count);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(title);

    if view.items.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let empty = Paragraph::new(vec![
            Line::from(Span::styled(
                "No items tracked yet",
                Style::default().fg(COLOR_DIM),
            )),
            Line::from(Span::styled(
                "Press s to start scanning",
                Style::default().fg(COLOR_DIM),
            )),
        ]);
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|item| {
            let marker = if item.image_base64.is_some() {
                "▣ "
            } else {
                "□ "
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(COLOR_DIM)),
                Span::styled(
                    truncate_string(&item.name, 28),
                    Style::default().fg(COLOR_HEADER),
                ),
                Span::styled(
                    format!("  [{}]", truncate_string(&item.category, 14)),
                    Style::default().fg(COLOR_TAG),
                ),
                Span::styled(
                    format!("  {}", item.scanned_at.format("%Y-%m-%d")),
                    Style::default().fg(COLOR_DIM),
                ),
                Span::styled(
                    format!("  {}{}", item.currency, format_price(item.price)),
                    Style::default()
                        .fg(COLOR_VALUE)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(view.selected.min(view.items.len().saturating_sub(1))));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_footer(frame: &mut Frame, area: Rect, view: &AppViewState) {
    let line = match view.alert {
        Some(alert) => Line::from(Span::styled(alert, Style::default().fg(COLOR_ERROR))),
        None => Line::from(Span::styled(
            "[s] scan  [↑/↓] select  [d] delete  [c] currency  [q] quit",
            Style::default().fg(COLOR_DIM),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Confirmation modal for deleting the selected scan.
pub fn render_delete_modal(frame: &mut Frame, view: &AppViewState) {
    let Some(item) = view.pending_delete else {
        return;
    };

    let area = centered_rect(46, 6, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ERROR))
        .title("Delete scan?");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let body = Paragraph::new(vec![
        Line::from(Span::styled(
            truncate_string(&item.name, 40),
            Style::default().fg(COLOR_HEADER),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("[y] ", Style::default().fg(COLOR_ERROR)),
            Span::raw("delete   "),
            Span::styled("[n] ", Style::default().fg(COLOR_DIM)),
            Span::raw("keep"),
        ]),
    ]);
    frame.render_widget(body, inner);
}
