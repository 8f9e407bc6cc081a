//! Main view state struct for UI rendering
//!
//! This module provides the `AppViewState` struct, which contains all data
//! that UI components need to render without requiring access to the full
//! `App`.

use crate::app::{App, CaptureStatus, ReviewState, Screen};
use crate::models::{Preference, TrackedProduct};
use crate::traits::FacingMode;

use super::DashboardViewState;

/// Below this confidence the review screen shows a verify-manually hint.
/// Advisory only; it never blocks confirmation.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Complete view state for UI rendering.
///
/// Borrows from `App` for the duration of one draw call, so UI components
/// stay pure functions of this struct.
pub struct AppViewState<'a> {
    /// Current screen being displayed
    pub screen: Screen,

    /// Tick counter for animations (spinner frames)
    pub tick_count: u64,

    /// Tracked items, newest first
    pub items: &'a [TrackedProduct],

    /// Preferred currency
    pub preference: &'a Preference,

    /// Capture screen status
    pub capture_status: &'a CaptureStatus,

    /// Which camera the capture screen is pointed at
    pub facing: FacingMode,

    /// Review screen state, when on the review screen
    pub review: Option<&'a ReviewState>,

    /// Dashboard alert line (analysis/save failures)
    pub alert: Option<&'a str>,

    /// Item awaiting delete confirmation
    pub pending_delete: Option<&'a TrackedProduct>,

    /// Selected index in the dashboard list
    pub selected: usize,

    /// Dashboard aggregates
    pub dashboard: DashboardViewState,
}

impl<'a> AppViewState<'a> {
    /// Snapshot the app state for one draw call.
    pub fn from_app(app: &'a App) -> Self {
        let pending_delete = app
            .pending_delete
            .as_deref()
            .and_then(|id| app.items.iter().find(|item| item.id == id));

        Self {
            screen: app.screen,
            tick_count: app.tick_count,
            items: &app.items,
            preference: &app.preference,
            capture_status: &app.capture_status,
            facing: app.facing,
            review: app.review.as_ref(),
            alert: app.alert.as_deref(),
            pending_delete,
            selected: app.selected,
            dashboard: DashboardViewState::from_items(&app.items, app.preferred_symbol()),
        }
    }

    /// Whether the review screen should show the low-confidence advisory.
    pub fn low_confidence(&self) -> bool {
        self.review
            .map(|r| r.result.confidence_score < LOW_CONFIDENCE_THRESHOLD)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockCamera, ReqwestHttpClient};
    use crate::models::AnalysisResult;
    use crate::storage::Storage;
    use crate::traits::CapturedFrame;
    use crate::vision::VisionClient;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();
        let vision = Arc::new(VisionClient::with_parts(
            "http://127.0.0.1:9",
            None,
            ReqwestHttpClient::new(),
        ));
        let app = App::new(storage, Arc::new(MockCamera::new()), vision);
        (dir, app)
    }

    fn review_with_confidence(confidence: f64) -> ReviewState {
        ReviewState::new(
            AnalysisResult {
                product_name: "x".to_string(),
                price: 1.0,
                currency: "$".to_string(),
                category: "Test".to_string(),
                confidence_score: confidence,
            },
            CapturedFrame {
                jpeg: vec![0xff],
                width: 1,
                height: 1,
            },
        )
    }

    #[tokio::test]
    async fn test_from_app_defaults() {
        let (_dir, app) = test_app();
        let view = AppViewState::from_app(&app);

        assert_eq!(view.screen, Screen::Dashboard);
        assert!(view.items.is_empty());
        assert!(view.alert.is_none());
        assert!(view.pending_delete.is_none());
        assert_eq!(view.dashboard.symbol, "$");
    }

    #[tokio::test]
    async fn test_low_confidence_threshold() {
        let (_dir, mut app) = test_app();
        app.review = Some(review_with_confidence(0.59));
        assert!(AppViewState::from_app(&app).low_confidence());

        app.review = Some(review_with_confidence(0.6));
        assert!(!AppViewState::from_app(&app).low_confidence());

        app.review = None;
        assert!(!AppViewState::from_app(&app).low_confidence());
    }
}
