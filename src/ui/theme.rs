//! Color theme constants for the PriceLens UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color - sky blue for highlights and the scan affordances
pub const COLOR_ACCENT: Color = Color::Rgb(56, 189, 248); // #38bdf8

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Price/value color - green for money amounts
pub const COLOR_VALUE: Color = Color::Rgb(4, 181, 117); // #04B575

/// Warning color - low-confidence advisory
pub const COLOR_WARNING: Color = Color::Yellow;

/// Error color - camera failures, alerts, invalid edits
pub const COLOR_ERROR: Color = Color::Red;

/// Category tag color
pub const COLOR_TAG: Color = Color::Gray;
