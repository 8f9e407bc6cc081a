//! Mock camera for testing.
//!
//! Serves fixture JPEG frames without touching hardware and counts
//! acquire/capture/release calls so tests can assert that capture flows
//! never leak a session.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{
    CameraDevice, CameraError, CameraSession, CaptureConfig, CapturedFrame,
};

/// Lifecycle counters shared between a [`MockCamera`] and its sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraCounters {
    pub acquired: usize,
    pub captured: usize,
    pub released: usize,
}

/// Mock camera device serving configured fixture frames.
#[derive(Debug, Clone, Default)]
pub struct MockCamera {
    counters: Arc<Mutex<CameraCounters>>,
    frame: Arc<Mutex<Option<Vec<u8>>>>,
    acquire_error: Arc<Mutex<Option<CameraError>>>,
    capture_error: Arc<Mutex<Option<CameraError>>>,
}

impl MockCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock camera that serves the given JPEG bytes for every capture.
    pub fn with_frame(jpeg: Vec<u8>) -> Self {
        let camera = Self::new();
        camera.set_frame(jpeg);
        camera
    }

    /// Set the fixture frame served by future captures.
    pub fn set_frame(&self, jpeg: Vec<u8>) {
        *self.frame.lock().unwrap() = Some(jpeg);
    }

    /// Make the next and all following acquisitions fail.
    pub fn fail_acquire_with(&self, error: CameraError) {
        *self.acquire_error.lock().unwrap() = Some(error);
    }

    /// Make the next and all following captures fail.
    pub fn fail_capture_with(&self, error: CameraError) {
        *self.capture_error.lock().unwrap() = Some(error);
    }

    /// Snapshot of the lifecycle counters.
    pub fn counters(&self) -> CameraCounters {
        *self.counters.lock().unwrap()
    }

    /// Sessions acquired but not yet released.
    pub fn live_sessions(&self) -> usize {
        let counters = self.counters();
        counters.acquired - counters.released
    }
}

#[async_trait]
impl CameraDevice for MockCamera {
    async fn acquire(
        &self,
        config: &CaptureConfig,
    ) -> Result<Box<dyn CameraSession>, CameraError> {
        if let Some(error) = self.acquire_error.lock().unwrap().clone() {
            return Err(error);
        }

        self.counters.lock().unwrap().acquired += 1;
        Ok(Box::new(MockSession {
            counters: Arc::clone(&self.counters),
            frame: Arc::clone(&self.frame),
            capture_error: Arc::clone(&self.capture_error),
            width: config.ideal_width,
            height: config.ideal_height,
            released: false,
        }))
    }
}

#[derive(Debug)]
struct MockSession {
    counters: Arc<Mutex<CameraCounters>>,
    frame: Arc<Mutex<Option<Vec<u8>>>>,
    capture_error: Arc<Mutex<Option<CameraError>>>,
    width: u32,
    height: u32,
    released: bool,
}

#[async_trait]
impl CameraSession for MockSession {
    async fn capture_frame(&mut self) -> Result<CapturedFrame, CameraError> {
        if self.released {
            return Err(CameraError::SessionReleased);
        }
        if let Some(error) = self.capture_error.lock().unwrap().clone() {
            return Err(error);
        }

        let jpeg = self
            .frame
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CameraError::CaptureFailed("no fixture frame configured".into()))?;

        self.counters.lock().unwrap().captured += 1;
        Ok(CapturedFrame {
            jpeg,
            width: self.width,
            height: self.height,
        })
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.counters.lock().unwrap().released += 1;
        }
    }

    fn is_released(&self) -> bool {
        self.released
    }
}
