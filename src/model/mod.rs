//! Data model for fitcheck.
//!
//! Everything here lives for one page session only; nothing is persisted.

mod analysis;
mod image;
mod wire;

pub use self::analysis::{AnalysisResult, Recommendations};
pub use self::image::{ImageFile, SelectedImage};
pub use self::wire::{ChatReply, ChatRequest, ErrorBody};
