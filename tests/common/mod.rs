//! Shared fixtures for integration tests.
//!
//! Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use pricelens::adapters::{MockCamera, ReqwestHttpClient};
use pricelens::app::App;
use pricelens::models::AnalysisResult;
use pricelens::storage::Storage;
use pricelens::vision::VisionClient;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// A small decodable JPEG, generated in memory.
pub fn fixture_jpeg() -> Vec<u8> {
    let img = image::RgbImage::from_fn(64, 48, |x, y| {
        image::Rgb([(x * 4 % 256) as u8, (y * 5 % 256) as u8, 200])
    });
    let mut out = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, 90);
    image::DynamicImage::ImageRgb8(img)
        .write_with_encoder(encoder)
        .unwrap();
    out
}

/// A canned analysis result.
pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        product_name: "Espresso Beans 1kg".to_string(),
        price: 18.9,
        currency: "€".to_string(),
        category: "Food".to_string(),
        confidence_score: 0.92,
    }
}

/// A generateContent response body wrapping the given result text.
pub fn candidate_body(result_json: &str) -> String {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [ { "text": result_json } ] } }
        ]
    })
    .to_string()
}

/// The canned result as the model would return it.
pub fn sample_result_body() -> String {
    candidate_body(&serde_json::to_string(&sample_result()).unwrap())
}

/// Build an app wired to a mock camera (with a fixture frame) and a vision
/// client pointed at `base_url`.
pub fn build_app(base_url: &str) -> (TempDir, MockCamera, App) {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).unwrap();
    let camera = MockCamera::with_frame(fixture_jpeg());
    let vision = Arc::new(VisionClient::with_parts(
        base_url,
        Some("test-key".to_string()),
        ReqwestHttpClient::new(),
    ));
    let app = App::new(storage, Arc::new(camera.clone()), vision);
    (dir, camera, app)
}

/// Receive the next app message or fail the test after a timeout.
pub async fn recv_message(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<pricelens::app::AppMessage>,
) -> pricelens::app::AppMessage {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for app message")
        .expect("message channel closed")
}
