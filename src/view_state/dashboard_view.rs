//! Dashboard-specific view state
//!
//! Aggregates derived from the item list once per frame, so the dashboard
//! renderer never recomputes them mid-layout.

use crate::models::TrackedProduct;

/// Aggregates and chart series for the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardViewState {
    /// Sum of all item prices
    pub total_value: f64,
    /// Display symbol of the preferred currency
    pub symbol: &'static str,
    pub item_count: usize,
    /// Price series in scan order (oldest first), in cents, for the
    /// trend sparkline
    pub trend: Vec<u64>,
}

impl DashboardViewState {
    /// Build the dashboard aggregates from the item list (newest first).
    pub fn from_items(items: &[TrackedProduct], symbol: &'static str) -> Self {
        let trend = items
            .iter()
            .rev()
            .map(|item| (item.price.max(0.0) * 100.0).round() as u64)
            .collect();

        Self {
            total_value: items.iter().map(|item| item.price).sum(),
            symbol,
            item_count: items.len(),
            trend,
        }
    }

    /// A trend needs at least two points to be worth drawing.
    pub fn has_trend(&self) -> bool {
        self.trend.len() > 1
    }
}
