//! Application message types for fitcheck.
//!
//! All UI events and async completions are represented as messages in the
//! Elm architecture style. Handlers answer a message with a [`Task`]
//! describing the async work the runtime has to do next.

use fitcheck_ui::{NoticeId, TypingId};

use crate::error::ClientError;
use crate::model::{AnalysisResult, ImageFile, SelectedImage};

/// Messages that can be sent to update application state.
#[derive(Debug, Clone)]
pub enum Message {
    // Image intake
    /// The file picker changed; `None` when nothing was picked
    ImageSelected(Option<ImageFile>),
    /// Reading the picked file finished
    ImageRead {
        ticket: u64,
        result: Result<Vec<u8>, String>,
    },

    // Analysis
    /// Analyze button clicked
    AnalyzeRequested,
    /// Reading the accepted file for upload finished
    UploadRead {
        ticket: u64,
        file: ImageFile,
        result: Result<Vec<u8>, String>,
    },
    /// The analysis request finished
    AnalysisFinished(Result<AnalysisResult, ClientError>),

    // Chat
    /// Send button clicked
    SendRequested,
    /// A key was pressed in the chat input
    KeyPressed(String),
    /// A chat request finished
    ChatFinished {
        typing: TypingId,
        result: Result<String, ClientError>,
    },

    // Page chrome
    /// Chat panel toggle clicked
    ToggleChatPanel,
    /// Close button of a notice clicked
    DismissNotice(NoticeId),
    /// Periodic timer; expires old notices
    Tick,
}

/// Async work requested by a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Nothing to do
    None,
    /// Read the picked file's bytes, then send [`Message::ImageRead`]
    ReadImage { ticket: u64, file: ImageFile },
    /// Read the accepted file for upload, then send [`Message::UploadRead`]
    ReadUpload { ticket: u64, file: ImageFile },
    /// Upload the image, then send [`Message::AnalysisFinished`]
    Analyze(SelectedImage),
    /// Send the chat message, then send [`Message::ChatFinished`]
    Chat { typing: TypingId, message: String },
}

impl Task {
    pub fn is_none(&self) -> bool {
        matches!(self, Task::None)
    }
}
