//! View state module for decoupling UI rendering from application state.
//!
//! This module provides view-only data structures that UI components can
//! use without importing the `App` struct directly. Rendering stays a pure
//! function: `App` builds an [`AppViewState`] borrow once per frame and the
//! `ui` module only reads from it.

mod app_view;
pub mod dashboard_view;

pub use app_view::{AppViewState, LOW_CONFIDENCE_THRESHOLD};
pub use dashboard_view::DashboardViewState;
