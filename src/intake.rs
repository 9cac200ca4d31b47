//! Client-side validation of picked image files.

use crate::constants::IMAGE_MIME_PREFIX;
use crate::error::IntakeError;
use crate::model::ImageFile;

/// Check a picked file against the upload rules.
///
/// The MIME type is checked before the size, so an oversized non-image
/// reports the type problem.
pub fn validate(file: &ImageFile, max_bytes: u64) -> Result<(), IntakeError> {
    if !is_image_mime(&file.mime) {
        return Err(IntakeError::NotAnImage {
            mime: file.mime.clone(),
        });
    }
    if file.size > max_bytes {
        return Err(IntakeError::TooLarge {
            size: file.size,
            max: max_bytes,
        });
    }
    Ok(())
}

/// Whether a MIME type denotes an image.
pub fn is_image_mime(mime: &str) -> bool {
    mime.get(..IMAGE_MIME_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_MIME_PREFIX))
}

/// MIME type for raw file contents, for sources that don't declare one.
///
/// Uses the magic bytes first and the file extension second. Returns an
/// empty string when neither identifies an image format.
pub fn sniff_mime(name: &str, bytes: &[u8]) -> String {
    let format = image::guess_format(bytes)
        .ok()
        .or_else(|| image::ImageFormat::from_path(name).ok());
    match format {
        Some(format) => format.to_mime_type().to_string(),
        None => String::new(),
    }
}
