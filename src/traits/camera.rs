//! Camera device trait abstraction.
//!
//! The camera is an exclusively-owned resource per capture session: a
//! [`CameraDevice`] hands out one [`CameraSession`] at a time, the session
//! produces JPEG still frames, and the owner must release it before leaving
//! the capture flow. Implementations include the production ffmpeg-backed
//! adapter and a mock for tests.

use async_trait::async_trait;
use thiserror::Error;

/// Which way the camera faces. Maps to device selection on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    /// Rear camera, preferred for scanning price tags.
    #[default]
    Back,
    /// Front/user-facing camera.
    Front,
}

impl FacingMode {
    /// The other facing mode, for the switch-camera action.
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::Back => FacingMode::Front,
            FacingMode::Front => FacingMode::Back,
        }
    }
}

/// Requested capture parameters.
///
/// Width and height are ideals, not guarantees; the device may deliver a
/// different resolution and the actual frame dimensions are reported on the
/// captured frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    pub facing: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
    /// JPEG quality in percent, 0-100.
    pub jpeg_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            facing: FacingMode::Back,
            ideal_width: 1920,
            ideal_height: 1080,
            jpeg_quality: 85,
        }
    }
}

impl CaptureConfig {
    /// The same configuration pointed at a different facing mode.
    pub fn with_facing(mut self, facing: FacingMode) -> Self {
        self.facing = facing;
        self
    }
}

/// A single still frame captured from the device, JPEG-encoded.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Camera acquisition and capture errors.
#[derive(Debug, Clone, Error)]
pub enum CameraError {
    #[error("Camera device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Camera access denied: {0}")]
    AccessDenied(String),

    #[error("Frame capture failed: {0}")]
    CaptureFailed(String),

    #[error("Camera session already released")]
    SessionReleased,
}

/// Trait for acquiring a camera.
///
/// `acquire` corresponds to requesting the media device from the platform;
/// it fails when the device is missing or permission is denied.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Acquire an exclusive capture session with the given parameters.
    async fn acquire(&self, config: &CaptureConfig)
        -> Result<Box<dyn CameraSession>, CameraError>;
}

/// An exclusively-owned capture session.
///
/// The owner must call [`release`](CameraSession::release) exactly once
/// before the session is dropped; adapters log a leak warning otherwise.
/// Capturing after release is an error.
#[async_trait]
pub trait CameraSession: Send + std::fmt::Debug {
    /// Capture one still frame as JPEG.
    async fn capture_frame(&mut self) -> Result<CapturedFrame, CameraError>;

    /// Release the underlying device handle. Idempotent.
    fn release(&mut self);

    /// Whether the session has been released.
    fn is_released(&self) -> bool;
}
