//! Trait abstractions for dependency injection and testability.
//!
//! This module provides trait-based abstractions for the application's
//! external collaborators, enabling dependency injection and mocking.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST)
//! - [`CameraDevice`] / [`CameraSession`] - camera acquisition and still capture

pub mod camera;
pub mod http;

pub use camera::{
    CameraDevice, CameraError, CameraSession, CaptureConfig, CapturedFrame, FacingMode,
};
pub use http::{Headers, HttpClient, HttpError, Response};
