//! Global constants for the fitcheck application

/// Largest image accepted for upload (5 MiB)
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// MIME type prefix every accepted file must carry
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Default path of the analysis endpoint
pub const ANALYZE_PATH: &str = "/analyze";

/// Default path of the chat endpoint
pub const CHAT_PATH: &str = "/chat";

/// Multipart field carrying the uploaded image
pub const UPLOAD_FIELD: &str = "file";

/// Analyze button label when idle
pub const ANALYZE_LABEL: &str = "Analyze";

/// Analyze button label while a request is pending
pub const ANALYZING_LABEL: &str = "Analyzing...";

/// User-facing notice and fallback texts.
pub mod text {
    pub const NOT_AN_IMAGE: &str = "Please select an image file (JPEG, PNG)";
    pub const IMAGE_TOO_LARGE: &str = "Image must be less than 5MB";
    pub const NO_IMAGE_SELECTED: &str = "Please upload an image first";
    pub const ANALYSIS_COMPLETE: &str = "Analysis complete!";
    pub const ANALYSIS_FAILED: &str = "Analysis failed. Please try again.";
    pub const CHAT_FALLBACK: &str = "Sorry, I'm having trouble responding. Please try again.";
}
