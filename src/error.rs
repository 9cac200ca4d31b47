//! Error types for fitcheck.

use thiserror::Error;

use crate::constants::text;

/// A picked file failed client-side validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// MIME type is not `image/*`
    #[error("Not an image: {mime:?}")]
    NotAnImage {
        /// Declared MIME type of the file
        mime: String,
    },

    /// File is larger than the upload limit
    #[error("Image too large: {size} bytes (limit {max})")]
    TooLarge {
        /// Size of the file in bytes
        size: u64,
        /// Configured limit in bytes
        max: u64,
    },
}

impl IntakeError {
    /// Text shown to the user in a warning notice.
    pub fn user_message(&self) -> &'static str {
        match self {
            IntakeError::NotAnImage { .. } => text::NOT_AN_IMAGE,
            IntakeError::TooLarge { .. } => text::IMAGE_TOO_LARGE,
        }
    }
}

/// A request to the backend failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Server answered with a non-2xx status
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Http {
        /// Response status code
        status: u16,
        /// `error` field of the response body, when present
        message: Option<String>,
    },

    /// Request could not be sent or the response could not be received
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    Request(String),
}

impl ClientError {
    /// Error text supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if e.is_builder() {
            ClientError::Request(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

/// A command handler refused or could not complete a user action.
///
/// Every variant is recoverable: the page stays usable and the user may
/// simply try again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Picked file failed validation
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// Analysis was requested before an image was ready
    #[error("No image selected")]
    NoImageSelected,

    /// Analysis was requested while another one is pending
    #[error("Analysis already in progress")]
    AnalysisInFlight,

    /// Chat message was empty after trimming
    #[error("Empty chat message")]
    EmptyMessage,

    /// A file read finished for a selection that has since been replaced
    #[error("Ignoring read result for superseded selection {ticket}")]
    StaleRead {
        /// Ticket of the superseded read
        ticket: u64,
    },

    /// Selected file could not be read
    #[error("Failed to read image: {0}")]
    Read(String),

    /// Backend request failed
    #[error(transparent)]
    Client(#[from] ClientError),
}
