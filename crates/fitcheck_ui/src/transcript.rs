//! Chat transcript with transient typing placeholders.

use web_time::SystemTime;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Class name used when rendering the message.
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// One message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// Identifier of a typing placeholder, derived from wall-clock milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypingId(pub u64);

impl TypingId {
    /// DOM id of the placeholder element.
    pub fn dom_id(self) -> String {
        format!("{}{}", crate::constants::TYPING_ID_PREFIX, self.0)
    }
}

/// Ordered, append-only list of chat messages.
///
/// Typing placeholders are tracked separately; they are the only entries
/// that ever disappear.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatEntry>,
    typing: Vec<TypingId>,
    last_typing_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ChatEntry) {
        self.messages.push(entry);
    }

    /// Insert a typing placeholder and return its id.
    ///
    /// Two placeholders created within the same millisecond still get
    /// distinct ids.
    pub fn start_typing(&mut self) -> TypingId {
        let millis = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let id = millis.max(self.last_typing_id + 1);
        self.last_typing_id = id;
        self.typing.push(TypingId(id));
        TypingId(id)
    }

    /// Remove a placeholder. Unknown ids are ignored.
    pub fn stop_typing(&mut self, id: TypingId) -> bool {
        let before = self.typing.len();
        self.typing.retain(|t| *t != id);
        self.typing.len() != before
    }

    pub fn messages(&self) -> &[ChatEntry] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
