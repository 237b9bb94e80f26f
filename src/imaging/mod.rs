/// Image plumbing for the capture pipeline
///
/// This module handles:
/// - Normalizing picked files to PNG within a size limit (compress.rs)
/// - Wrapping the normalized payload as a base64 data URL (convert.rs)

pub mod compress;
pub mod convert;
