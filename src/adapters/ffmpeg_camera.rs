//! Camera adapter backed by an ffmpeg child process.
//!
//! Grabs single V4L2 still frames by spawning `ffmpeg` per capture. The
//! session holds no OS stream between captures; exclusivity is enforced by
//! the acquire/release discipline of [`CameraSession`], and a session that
//! is dropped without release logs a leak warning.

use async_trait::async_trait;
use tokio::process::Command;

use crate::traits::{
    CameraDevice, CameraError, CameraSession, CaptureConfig, CapturedFrame, FacingMode,
};

/// Environment variable overriding the back-camera device path.
pub const CAMERA_DEVICE_ENV: &str = "PRICELENS_CAMERA";

const BACK_DEVICE: &str = "/dev/video0";
const FRONT_DEVICE: &str = "/dev/video1";

/// Production camera adapter shelling out to ffmpeg for each frame.
#[derive(Debug, Clone)]
pub struct FfmpegCamera {
    ffmpeg_bin: String,
}

impl FfmpegCamera {
    pub fn new() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
        }
    }

    /// Use a specific ffmpeg binary instead of resolving from PATH.
    pub fn with_binary(ffmpeg_bin: impl Into<String>) -> Self {
        Self {
            ffmpeg_bin: ffmpeg_bin.into(),
        }
    }

    /// Resolve the device path for a facing mode.
    ///
    /// `PRICELENS_CAMERA` overrides the back camera; the front camera is
    /// always the second V4L2 device.
    fn device_path(facing: FacingMode) -> String {
        match facing {
            FacingMode::Back => match std::env::var(CAMERA_DEVICE_ENV) {
                Ok(path) if !path.is_empty() => path,
                _ => BACK_DEVICE.to_string(),
            },
            FacingMode::Front => FRONT_DEVICE.to_string(),
        }
    }
}

impl Default for FfmpegCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// Map JPEG quality percent onto ffmpeg's mjpeg qscale (2 best .. 31 worst).
fn quality_to_qscale(quality: u8) -> u8 {
    let quality = quality.min(100) as f32;
    let qscale = 31.0 - quality / 100.0 * 29.0;
    (qscale.round() as u8).clamp(2, 31)
}

#[async_trait]
impl CameraDevice for FfmpegCamera {
    async fn acquire(
        &self,
        config: &CaptureConfig,
    ) -> Result<Box<dyn CameraSession>, CameraError> {
        let device = Self::device_path(config.facing);

        match tokio::fs::metadata(&device).await {
            Ok(_) => {}
            Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(CameraError::AccessDenied(device));
            }
            Err(_) => {
                return Err(CameraError::DeviceUnavailable(device));
            }
        }

        tracing::debug!(%device, facing = ?config.facing, "camera session acquired");
        Ok(Box::new(FfmpegSession {
            ffmpeg_bin: self.ffmpeg_bin.clone(),
            device,
            config: config.clone(),
            released: false,
        }))
    }
}

#[derive(Debug)]
struct FfmpegSession {
    ffmpeg_bin: String,
    device: String,
    config: CaptureConfig,
    released: bool,
}

#[async_trait]
impl CameraSession for FfmpegSession {
    async fn capture_frame(&mut self) -> Result<CapturedFrame, CameraError> {
        if self.released {
            return Err(CameraError::SessionReleased);
        }

        let video_size = format!("{}x{}", self.config.ideal_width, self.config.ideal_height);
        let qscale = quality_to_qscale(self.config.jpeg_quality).to_string();

        let output = Command::new(&self.ffmpeg_bin)
            .args([
                "-hide_banner",
                "-loglevel",
                "error",
                "-f",
                "v4l2",
                "-video_size",
                &video_size,
                "-i",
                &self.device,
                "-frames:v",
                "1",
                "-f",
                "image2pipe",
                "-c:v",
                "mjpeg",
                "-q:v",
                &qscale,
                "pipe:1",
            ])
            .output()
            .await
            .map_err(|err| CameraError::CaptureFailed(err.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CameraError::CaptureFailed(stderr));
        }
        if output.stdout.is_empty() {
            return Err(CameraError::CaptureFailed(
                "ffmpeg produced no frame data".to_string(),
            ));
        }

        // The device may have negotiated a different resolution than the
        // ideal; report what was actually delivered.
        let decoded = image::load_from_memory(&output.stdout)
            .map_err(|err| CameraError::CaptureFailed(err.to_string()))?;

        Ok(CapturedFrame {
            width: decoded.width(),
            height: decoded.height(),
            jpeg: output.stdout,
        })
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            tracing::debug!(device = %self.device, "camera session released");
        }
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for FfmpegSession {
    fn drop(&mut self) {
        if !self.released {
            tracing::warn!(device = %self.device, "camera session dropped without release");
        }
    }
}
