//! fitcheck_ui - page regions, HTML templating and views for fitcheck
//!
//! The controller in the main crate describes what each region of the page
//! should show; this crate turns that into markup and writes it either to
//! the browser DOM ([`DomView`], wasm only) or to memory ([`MemoryView`]).

pub mod constants;
pub mod html;
mod notice;
mod state;
mod transcript;
mod view;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use notice::{Notice, NoticeId, NoticeStack, Severity};
pub use state::{ButtonState, PanelVisibility, Preview};
pub use transcript::{ChatEntry, Sender, Transcript, TypingId};
pub use view::{MemoryView, View};

#[cfg(target_arch = "wasm32")]
pub use dom::{notice_id_of, DomView, ElementIds, PageElements, NOTICE_ID_ATTR};

/// Errors raised while binding a view to the page.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// A required element is not in the document
    #[error("Critical element missing from DOM: {0}")]
    MissingElement(String),

    /// An element exists but is not of the expected kind
    #[error("Element has unexpected type: {0}")]
    WrongElementType(String),

    /// The document has no body
    #[error("Document has no body")]
    NoBody,

    /// Not running in a page
    #[error("No window or document available")]
    NoDocument,
}
