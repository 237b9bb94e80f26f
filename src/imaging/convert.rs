use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::PathBuf;
use tokio::task;

use super::compress::{compress, CompressOptions};
use crate::error::CaptureError;

/// A picked image normalized for upload: PNG bytes for the local preview
/// and the same payload wrapped as a base64 data URL for the wire body.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    /// `data:image/png;base64,…` payload the endpoint expects
    pub data_url: String,
    /// Normalized PNG bytes, kept for the in-form preview
    pub png: Vec<u8>,
}

/// Load a picked file, normalize it to a size-limited PNG, and wrap it as
/// a data URL.
///
/// Decode and encode run on a blocking task because the image work is
/// CPU-intensive. Every failure comes back as an explicit error; a bad
/// file never leaves the pipeline hanging.
pub async fn encode_capture(
    path: PathBuf,
    options: CompressOptions,
) -> Result<EncodedImage, CaptureError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| CaptureError::Decode(format!("could not read {}: {}", path.display(), e)))?;

    task::spawn_blocking(move || encode_capture_blocking(&bytes, &options))
        .await
        .map_err(|e| CaptureError::Decode(format!("task join error: {}", e)))?
}

/// Blocking implementation of capture encoding
fn encode_capture_blocking(
    bytes: &[u8],
    options: &CompressOptions,
) -> Result<EncodedImage, CaptureError> {
    let png = compress(bytes, options)?;
    let data_url = format!("data:image/png;base64,{}", STANDARD.encode(&png));
    Ok(EncodedImage { data_url, png })
}
