//! Centralized constants for fitcheck_ui
//!
//! Markup class names and timing defaults shared by the view implementations.

// =============================================================================
// Notices
// =============================================================================

/// Default lifetime of a notice before it is removed automatically
pub const DEFAULT_NOTICE_TIMEOUT_MS: u64 = 5000;

/// Classes applied to every notice banner (severity class is appended)
pub const NOTICE_CLASSES: &str = "alert alert-dismissible fade show position-fixed top-0 end-0 m-3";

// =============================================================================
// Preview
// =============================================================================

/// Alt text for the preview image
pub const PREVIEW_ALT: &str = "Uploaded preview";

/// Class applied to the preview image
pub const PREVIEW_IMG_CLASS: &str = "img-preview";

/// Inline message shown when the selected file could not be read
pub const PREVIEW_READ_ERROR: &str = "Error loading image";

// =============================================================================
// Chat
// =============================================================================

/// Number of animated dots in the typing indicator
pub const TYPING_DOTS: usize = 3;

/// Prefix of the DOM id given to a typing indicator
pub const TYPING_ID_PREFIX: &str = "typing-";

// =============================================================================
// Results
// =============================================================================

/// Class toggled to hide the results region
pub const HIDDEN_CLASS: &str = "d-none";
