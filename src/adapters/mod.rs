//! Concrete implementations of trait abstractions.
//!
//! This module provides production-ready adapters implementing the traits
//! defined in `crate::traits`, plus test doubles in the [`mock`] submodule.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FfmpegCamera`] - V4L2 still capture through an ffmpeg child process
//!
//! # Mock Implementations
//!
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::MockCamera`] - Fixture frames and acquire/release accounting

pub mod ffmpeg_camera;
pub mod mock;
pub mod reqwest_http;

pub use ffmpeg_camera::FfmpegCamera;
pub use mock::{MockCamera, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
