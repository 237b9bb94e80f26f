use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::error::CaptureError;

/// Never downscale below this edge length; at that point the smallest
/// encoding we can produce is returned even if it exceeds the limit.
const MIN_EDGE: u32 = 64;

/// Options for [`compress`]. Passed explicitly by the caller; the only
/// default lives in the `Default` impl, not in module state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressOptions {
    /// Target upper bound for the encoded payload, in megabytes
    pub max_size_mb: f32,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self { max_size_mb: 3.0 }
    }
}

impl CompressOptions {
    fn max_bytes(&self) -> usize {
        (self.max_size_mb * 1024.0 * 1024.0) as usize
    }
}

/// Compress an image payload to (at most, best effort) the configured size.
///
/// The input is decoded, normalized to PNG, and halved in resolution until
/// the encoding fits under `options.max_size_mb`. Payloads already under the
/// limit come back as a single PNG re-encode at full resolution. Pure
/// transform: no retry, no side effects; errors on corrupt or unsupported
/// input are the caller's to handle.
pub fn compress(bytes: &[u8], options: &CompressOptions) -> Result<Vec<u8>, CaptureError> {
    let mut current = image::load_from_memory(bytes)
        .map_err(|e| CaptureError::Decode(e.to_string()))?;

    let limit = options.max_bytes();

    loop {
        let encoded = encode_png(&current)?;
        if encoded.len() <= limit {
            return Ok(encoded);
        }
        if current.width() <= MIN_EDGE || current.height() <= MIN_EDGE {
            // Can't reasonably shrink further; return the smallest we got
            return Ok(encoded);
        }
        current = current.resize(
            (current.width() / 2).max(MIN_EDGE),
            (current.height() / 2).max(MIN_EDGE),
            FilterType::Lanczos3,
        );
    }
}

/// Encode a decoded image as PNG bytes
fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, CaptureError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| CaptureError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbaImage};

    /// Deterministic noise image; noise keeps PNG from compressing away
    fn noise_image(width: u32, height: u32) -> Vec<u8> {
        let mut seed: u32 = 0x2545_f491;
        let img = RgbaImage::from_fn(width, height, |_, _| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let [a, b, c, _] = seed.to_le_bytes();
            image::Rgba([a, b, c, 255])
        });
        encode_png(&DynamicImage::ImageRgba8(img)).unwrap()
    }

    #[test]
    fn test_small_payload_is_left_at_full_resolution() {
        let input = noise_image(32, 32);
        let output = compress(&input, &CompressOptions::default()).unwrap();

        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!(decoded.dimensions(), (32, 32));
    }

    #[test]
    fn test_oversized_payload_is_downscaled() {
        let input = noise_image(256, 256);
        let options = CompressOptions { max_size_mb: 0.01 };
        let output = compress(&input, &options).unwrap();

        let decoded = image::load_from_memory(&output).unwrap();
        let (w, h) = decoded.dimensions();
        assert!(w < 256 && h < 256);
        assert!(output.len() < input.len());
    }

    #[test]
    fn test_corrupt_input_is_a_decode_error() {
        let result = compress(b"definitely not an image", &CompressOptions::default());
        assert!(matches!(result, Err(CaptureError::Decode(_))));
    }

    #[test]
    fn test_output_is_png_regardless_of_input_format() {
        // Encode input as JPEG, expect PNG back
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            16,
            16,
            image::Rgba([200, 100, 50, 255]),
        ));
        let mut jpeg = Cursor::new(Vec::new());
        img.to_rgb8()
            .write_to(&mut jpeg, ImageFormat::Jpeg)
            .unwrap();

        let output = compress(&jpeg.into_inner(), &CompressOptions::default()).unwrap();
        assert_eq!(
            image::guess_format(&output).unwrap(),
            ImageFormat::Png
        );
    }
}
