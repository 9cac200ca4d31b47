//! Transient notices (dismissible banners that expire on their own).

use web_time::{Duration, Instant};

/// Severity of a notice, mapped onto the page's alert styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Success,
    Danger,
}

impl Severity {
    /// Suffix used in the `alert-*` class.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Success => "success",
            Severity::Danger => "danger",
        }
    }
}

/// Identifier of a notice within one [`NoticeStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(pub u64);

/// A single banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
}

/// Notices currently on screen, oldest first.
///
/// No de-duplication: pushing the same message twice shows two banners.
#[derive(Debug, Clone)]
pub struct NoticeStack {
    notices: Vec<Notice>,
    timeout: Duration,
    next_id: u64,
}

impl NoticeStack {
    pub fn new(timeout: Duration) -> Self {
        Self {
            notices: Vec::new(),
            timeout,
            next_id: 0,
        }
    }

    /// Add a notice stamped with the current time.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> Notice {
        self.push_at(message, severity, Instant::now())
    }

    /// Add a notice with an explicit creation time.
    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        created_at: Instant,
    ) -> Notice {
        let notice = Notice {
            id: NoticeId(self.next_id),
            message: message.into(),
            severity,
            created_at,
        };
        self.next_id += 1;
        self.notices.push(notice.clone());
        notice
    }

    /// Remove a notice the user closed. Returns false if it already expired.
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    /// Drop every notice older than the timeout and return their ids.
    pub fn expire(&mut self, now: Instant) -> Vec<NoticeId> {
        let timeout = self.timeout;
        let mut expired = Vec::new();
        self.notices.retain(|n| {
            let keep = now.saturating_duration_since(n.created_at) < timeout;
            if !keep {
                expired.push(n.id);
            }
            keep
        });
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

impl Default for NoticeStack {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            crate::constants::DEFAULT_NOTICE_TIMEOUT_MS,
        ))
    }
}
