//! Thumbnail generation for stored scans.
//!
//! The persisted record embeds a small base64 JPEG instead of the full
//! captured frame, keeping the items file compact. Thumbnail failures are
//! not fatal; the record is simply stored without an image.

use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;

/// Longest edge of the stored thumbnail, in pixels.
pub const THUMBNAIL_EDGE: u32 = 96;

const THUMBNAIL_JPEG_QUALITY: u8 = 80;

/// Downscale a captured JPEG frame to thumbnail size.
pub fn generate(jpeg: &[u8], max_edge: u32) -> Result<Vec<u8>, image::ImageError> {
    let frame = image::load_from_memory(jpeg)?;
    let thumb = frame.thumbnail(max_edge, max_edge);

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, THUMBNAIL_JPEG_QUALITY);
    thumb.write_with_encoder(encoder)?;
    Ok(out)
}

/// Base64-encoded thumbnail for embedding in a stored record.
///
/// Returns `None` (with a log line) when the frame cannot be decoded; the
/// scan itself is still saved.
pub fn thumbnail_base64(jpeg: &[u8]) -> Option<String> {
    match generate(jpeg, THUMBNAIL_EDGE) {
        Ok(bytes) => Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
        Err(err) => {
            tracing::warn!(%err, "thumbnail generation failed, storing record without image");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    /// A decodable in-memory JPEG fixture.
    fn fixture_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut out = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut out, 90);
        image::DynamicImage::ImageRgb8(img)
            .write_with_encoder(encoder)
            .unwrap();
        out
    }

    #[test]
    fn test_generate_downscales_to_edge() {
        let jpeg = fixture_jpeg(640, 480);
        let thumb = generate(&jpeg, THUMBNAIL_EDGE).unwrap();

        let decoded = image::load_from_memory(&thumb).unwrap();
        assert!(decoded.width() <= THUMBNAIL_EDGE);
        assert!(decoded.height() <= THUMBNAIL_EDGE);
        // Aspect ratio is preserved by thumbnail().
        assert_eq!(decoded.width(), 96);
        assert_eq!(decoded.height(), 72);
    }

    #[test]
    fn test_generate_keeps_small_frames() {
        let jpeg = fixture_jpeg(32, 24);
        let thumb = generate(&jpeg, THUMBNAIL_EDGE).unwrap();
        let decoded = image::load_from_memory(&thumb).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 24));
    }

    #[test]
    fn test_thumbnail_base64_round_trips() {
        let jpeg = fixture_jpeg(200, 200);
        let encoded = thumbnail_base64(&jpeg).unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert!(image::load_from_memory(&bytes).is_ok());
    }

    #[test]
    fn test_thumbnail_base64_none_for_garbage() {
        assert!(thumbnail_base64(&[0x00, 0x01, 0x02]).is_none());
    }
}
