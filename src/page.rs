//! Region state of the page, kept in sync with a [`View`].
//!
//! Every mutation goes through a method here so the state and what the view
//! shows never diverge.

use fitcheck_ui::{
    ButtonState, ChatEntry, NoticeId, NoticeStack, PanelVisibility, Preview, Severity, Transcript,
    TypingId, View,
};
use web_time::{Duration, Instant};

use crate::constants::ANALYZE_LABEL;
use crate::model::ImageFile;

/// Where the current image selection stands.
///
/// An accepted file stays uploadable whatever happens to its preview read;
/// `bytes` is only filled in once some read of it succeeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    /// Nothing accepted yet
    #[default]
    None,
    /// Accepted file, identified by the ticket of its preview read
    Accepted {
        ticket: u64,
        file: ImageFile,
        bytes: Option<Vec<u8>>,
    },
}

/// Page state plus the view that displays it.
pub struct Page<V> {
    view: V,
    preview: Preview,
    selection: Selection,
    next_ticket: u64,
    analyze_button: ButtonState,
    results: Option<String>,
    transcript: Transcript,
    notices: NoticeStack,
    panel: PanelVisibility,
}

impl<V: View> Page<V> {
    /// Wrap a view. The panel starts in whatever state the view reports
    /// unless `panel` overrides it.
    pub fn new(mut view: V, notice_timeout: Duration, panel: Option<PanelVisibility>) -> Self {
        let panel = match panel {
            Some(panel) => {
                view.set_panel_visibility(panel);
                panel
            }
            None => view.panel_visibility(),
        };
        Self {
            view,
            preview: Preview::Empty,
            selection: Selection::None,
            next_ticket: 0,
            analyze_button: ButtonState::new(ANALYZE_LABEL),
            results: None,
            transcript: Transcript::new(),
            notices: NoticeStack::new(notice_timeout),
            panel,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn analyze_button(&self) -> &ButtonState {
        &self.analyze_button
    }

    pub fn results(&self) -> Option<&str> {
        self.results.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn notices(&self) -> &NoticeStack {
        &self.notices
    }

    pub fn panel(&self) -> PanelVisibility {
        self.panel
    }

    // --- image -------------------------------------------------------------

    /// Accept a file: start a read and show the spinner. Returns the ticket
    /// the read result has to present.
    pub fn begin_read(&mut self, file: ImageFile) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.selection = Selection::Accepted {
            ticket,
            file,
            bytes: None,
        };
        self.set_preview(Preview::Loading);
        ticket
    }

    /// The file accepted under `ticket`, if it is still the current one.
    pub fn accepted(&self, ticket: u64) -> Option<&ImageFile> {
        match &self.selection {
            Selection::Accepted { ticket: t, file, .. } if *t == ticket => Some(file),
            _ => None,
        }
    }

    /// Keep the contents read for `ticket`. Ignored once the selection has
    /// moved on.
    pub fn store_bytes(&mut self, ticket: u64, contents: Vec<u8>) {
        if let Selection::Accepted {
            ticket: t, bytes, ..
        } = &mut self.selection
        {
            if *t == ticket {
                *bytes = Some(contents);
            }
        }
    }

    pub fn set_preview(&mut self, preview: Preview) {
        self.view.set_preview(&preview);
        self.preview = preview;
    }

    // --- analysis ----------------------------------------------------------

    pub fn set_analyze_busy(&mut self, label: &str) {
        self.analyze_button.set_busy(label);
        self.view.set_analyze_button(&self.analyze_button);
    }

    pub fn restore_analyze_button(&mut self) {
        self.analyze_button.restore();
        self.view.set_analyze_button(&self.analyze_button);
    }

    pub fn show_results(&mut self, html: String) {
        self.view.show_results(&html);
        self.results = Some(html);
    }

    // --- chat --------------------------------------------------------------

    pub fn chat_input(&self) -> String {
        self.view.chat_input()
    }

    pub fn clear_chat_input(&mut self) {
        self.view.clear_chat_input();
    }

    pub fn append_message(&mut self, entry: ChatEntry) {
        self.view.append_message(&entry);
        self.transcript.push(entry);
    }

    pub fn start_typing(&mut self) -> TypingId {
        let id = self.transcript.start_typing();
        self.view.show_typing(id);
        id
    }

    pub fn stop_typing(&mut self, id: TypingId) {
        if !self.transcript.stop_typing(id) {
            log::trace!("Typing indicator {:?} already removed", id);
        }
        self.view.remove_typing(id);
    }

    // --- notices -----------------------------------------------------------

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        let notice = self.notices.push(message, severity);
        self.view.show_notice(&notice);
    }

    pub fn dismiss_notice(&mut self, id: NoticeId) -> bool {
        let removed = self.notices.dismiss(id);
        if removed {
            self.view.remove_notice(id);
        }
        removed
    }

    /// Remove notices that outlived the timeout. Returns how many went.
    pub fn expire_notices(&mut self, now: Instant) -> usize {
        let expired = self.notices.expire(now);
        for id in &expired {
            self.view.remove_notice(*id);
        }
        expired.len()
    }

    // --- panel -------------------------------------------------------------

    pub fn toggle_panel(&mut self) -> PanelVisibility {
        self.panel = self.panel.toggled();
        self.view.set_panel_visibility(self.panel);
        self.panel
    }
}
