//! HTML templating helpers.
//!
//! Every piece of user or server supplied text goes through [`escape`]
//! before it is placed in markup.

use crate::constants::{NOTICE_CLASSES, TYPING_DOTS};
use crate::notice::Notice;
use crate::state::Preview;
use crate::transcript::ChatEntry;

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inner markup of the preview region.
pub fn preview(preview: &Preview) -> String {
    match preview {
        Preview::Empty => String::new(),
        Preview::Loading => {
            r#"<div class="spinner-border text-primary" role="status"></div>"#.to_string()
        }
        Preview::Image { data_url, alt } => format!(
            r#"<img src="{}" alt="{}" class="{}">"#,
            escape(data_url),
            escape(alt),
            crate::constants::PREVIEW_IMG_CLASS
        ),
        Preview::Error(message) => format!(r#"<p class="text-danger">{}</p>"#, escape(message)),
    }
}

/// Inner markup of a button, with a small spinner while busy.
pub fn button_label(label: &str, busy: bool) -> String {
    if busy {
        format!(
            r#"<span class="spinner-border spinner-border-sm" role="status"></span> {}"#,
            escape(label)
        )
    } else {
        escape(label)
    }
}

/// Class list of a chat message element.
pub fn message_classes(entry: &ChatEntry) -> String {
    format!(
        "message {} animate__animated animate__fadeInUp",
        entry.sender.as_str()
    )
}

/// Inner markup of a chat message element.
pub fn message_body(entry: &ChatEntry) -> String {
    format!("<p>{}</p>", escape(&entry.text))
}

/// Class list of the typing indicator element.
pub const TYPING_CLASSES: &str = "message bot typing d-flex gap-1";

/// Inner markup of the typing indicator.
pub fn typing_dots() -> String {
    r#"<div class="typing-dot"></div>"#.repeat(TYPING_DOTS)
}

/// Class list of a notice banner.
pub fn notice_classes(notice: &Notice) -> String {
    format!("{} alert-{}", NOTICE_CLASSES, notice.severity.as_str())
}

/// Inner markup of a notice banner (message plus close button).
pub fn notice_body(notice: &Notice) -> String {
    format!(
        r#"{}<button type="button" class="btn-close" data-bs-dismiss="alert"></button>"#,
        escape(&notice.message)
    )
}

/// A rounded color badge.
pub fn badge(text: &str) -> String {
    format!(
        r#"<span class="badge rounded-pill bg-primary">{}</span>"#,
        escape(text)
    )
}

/// A list-group item.
pub fn list_item(text: &str) -> String {
    format!(r#"<li class="list-group-item">{}</li>"#, escape(text))
}
