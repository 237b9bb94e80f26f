/// Failure taxonomy for the capture pipeline
///
/// The form UI only shows a single error indicator, but the causes stay
/// distinct here so log output can tell a bad photo from a bad network
/// from a rejected upload.

use thiserror::Error;

/// Everything that can go wrong between picking a file and reporting
/// its uploaded path to the form.
///
/// Variants carry plain strings because they travel inside UI messages,
/// which must be `Clone` (the underlying `image` and `reqwest` errors
/// are not).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaptureError {
    /// The picked file could not be read or decoded as an image
    #[error("could not decode image: {0}")]
    Decode(String),

    /// Re-encoding the normalized PNG failed
    #[error("could not encode image: {0}")]
    Encode(String),

    /// The upload request failed (connection, timeout, or non-2xx status)
    #[error("upload failed: {0}")]
    Network(String),

    /// The endpoint answered 2xx but the body had no usable image path
    #[error("upload response was malformed: {0}")]
    MalformedResponse(String),

    /// The upload succeeded but the returned path failed field validation,
    /// so the value was withheld from the form
    #[error("uploaded image path {0:?} failed validation")]
    Rejected(String),
}

impl CaptureError {
    /// One log line per failure, with a distinct prefix per cause.
    pub fn log(&self) {
        match self {
            CaptureError::Decode(_) | CaptureError::Encode(_) => {
                eprintln!("❌ Conversion failed: {}", self);
            }
            CaptureError::Network(_) | CaptureError::MalformedResponse(_) => {
                eprintln!("❌ Upload failed: {}", self);
            }
            CaptureError::Rejected(_) => {
                eprintln!("⚠️  Value withheld: {}", self);
            }
        }
    }
}
