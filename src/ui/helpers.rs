//! Helper functions and constants for UI rendering
//!
//! Contains utility functions for formatting, truncation, and common UI
//! patterns.

use ratatui::layout::Rect;

/// Spinner frames for the opening/analyzing animations
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The spinner frame for an animation tick.
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

/// Format a price with two decimals, `.` thousands grouping and `,` as the
/// decimal separator (1234.5 -> "1.234,50").
pub fn format_price(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{}{},{:02}", if negative { "-" } else { "" }, grouped, frac)
}

/// Format a confidence score as a whole percentage ("92%").
pub fn format_confidence(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// Truncate a string to approximately max_len bytes, adding "..." if
/// truncated. Safely handles UTF-8 by finding the nearest char boundary.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let end = find_char_boundary(s, target);
        format!("{}...", &s[..end])
    }
}

/// Find the nearest valid UTF-8 char boundary at or before the given byte
/// index.
pub fn find_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut end = index;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// A rect of the given size centered inside `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
