//! The [`View`] trait and an in-memory implementation.
//!
//! The controller never touches the page directly. It writes region state
//! through a `View`; the browser build uses [`crate::DomView`], headless
//! runs and tests use [`MemoryView`].

use crate::notice::{Notice, NoticeId};
use crate::state::{ButtonState, PanelVisibility, Preview};
use crate::transcript::{ChatEntry, TypingId};

/// Regions of the page the controller writes to.
pub trait View {
    /// Replace the preview region.
    fn set_preview(&mut self, preview: &Preview);

    /// Update the analyze trigger.
    fn set_analyze_button(&mut self, button: &ButtonState);

    /// Reveal the results region and replace its contents.
    fn show_results(&mut self, html: &str);

    /// Append a message to the chat log and scroll it into view.
    fn append_message(&mut self, entry: &ChatEntry);

    /// Append a typing placeholder and scroll it into view.
    fn show_typing(&mut self, id: TypingId);

    /// Remove a typing placeholder if it is still present.
    fn remove_typing(&mut self, id: TypingId);

    /// Current text of the chat input.
    fn chat_input(&self) -> String;

    fn clear_chat_input(&mut self);

    /// Show a notice banner.
    fn show_notice(&mut self, notice: &Notice);

    /// Remove a notice banner if it is still present.
    fn remove_notice(&mut self, id: NoticeId);

    /// Visibility the chat panel currently has.
    fn panel_visibility(&self) -> PanelVisibility;

    fn set_panel_visibility(&mut self, visibility: PanelVisibility);
}

/// A view that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    pub preview: Preview,
    /// Every preview state written, in order
    pub preview_history: Vec<Preview>,
    pub analyze_button: Option<ButtonState>,
    /// Markup of the results region; `None` while hidden
    pub results: Option<String>,
    pub messages: Vec<ChatEntry>,
    pub typing: Vec<TypingId>,
    pub input: String,
    pub notices: Vec<Notice>,
    pub panel: PanelVisibility,
    /// Number of times the chat log was scrolled to the newest entry
    pub scrolls: usize,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given panel visibility, as the page markup would.
    pub fn with_panel(panel: PanelVisibility) -> Self {
        Self {
            panel,
            ..Self::default()
        }
    }

    /// Simulate typing into the chat input.
    pub fn type_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }
}

impl View for MemoryView {
    fn set_preview(&mut self, preview: &Preview) {
        self.preview = preview.clone();
        self.preview_history.push(preview.clone());
    }

    fn set_analyze_button(&mut self, button: &ButtonState) {
        self.analyze_button = Some(button.clone());
    }

    fn show_results(&mut self, html: &str) {
        self.results = Some(html.to_string());
    }

    fn append_message(&mut self, entry: &ChatEntry) {
        self.messages.push(entry.clone());
        self.scrolls += 1;
    }

    fn show_typing(&mut self, id: TypingId) {
        self.typing.push(id);
        self.scrolls += 1;
    }

    fn remove_typing(&mut self, id: TypingId) {
        self.typing.retain(|t| *t != id);
    }

    fn chat_input(&self) -> String {
        self.input.clone()
    }

    fn clear_chat_input(&mut self) {
        self.input.clear();
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn remove_notice(&mut self, id: NoticeId) {
        self.notices.retain(|n| n.id != id);
    }

    fn panel_visibility(&self) -> PanelVisibility {
        self.panel
    }

    fn set_panel_visibility(&mut self, visibility: PanelVisibility) {
        self.panel = visibility;
    }
}
