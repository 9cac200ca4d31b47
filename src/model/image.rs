//! Picked and accepted image files.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Metadata of a file the user picked, before any bytes are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name as reported by the picker
    pub name: String,
    /// Declared MIME type (may be empty)
    pub mime: String,
    /// Size in bytes
    pub size: u64,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }
}

/// An accepted image whose contents have been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file: ImageFile,
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn new(file: ImageFile, bytes: Vec<u8>) -> Self {
        Self { file, bytes }
    }

    /// `data:` URL of the contents, for the preview.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.file.mime, STANDARD.encode(&self.bytes))
    }
}
