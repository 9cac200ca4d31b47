//! Message handlers for fitcheck.
//!
//! Each handler processes one user action or async completion and reports
//! back with the next [`Task`] or the reason the action did not go ahead.
//! User-visible feedback (notices, inline errors) is produced here; the
//! returned error is for logging and tests.

use fitcheck_ui::{ChatEntry, NoticeId, Preview, Severity, TypingId, View};
use web_time::Instant;

use crate::constants::{ANALYZING_LABEL, text};
use crate::error::{ClientError, CommandError};
use crate::intake;
use crate::message::Task;
use crate::model::{AnalysisResult, ImageFile, SelectedImage};
use crate::page::{Page, Selection};
use crate::render;

/// Handle a change of the file picker.
///
/// Nothing picked is a silent no-op. A file that fails validation raises a
/// warning and leaves the preview and previous selection untouched.
pub fn handle_image_selected<V: View>(
    page: &mut Page<V>,
    file: Option<ImageFile>,
    max_bytes: u64,
) -> Result<Task, CommandError> {
    let Some(file) = file else {
        return Ok(Task::None);
    };

    if let Err(e) = intake::validate(&file, max_bytes) {
        page.notify(e.user_message(), Severity::Warning);
        return Err(e.into());
    }

    log::info!("📷 Accepted {} ({}, {} bytes)", file.name, file.mime, file.size);
    let ticket = page.begin_read(file.clone());
    Ok(Task::ReadImage { ticket, file })
}

/// Handle the end of a preview read: show the image or an inline error.
///
/// A failed read only affects the preview; the file stays selected and can
/// still be analyzed.
pub fn handle_image_read<V: View>(
    page: &mut Page<V>,
    ticket: u64,
    result: Result<Vec<u8>, String>,
) -> Result<Task, CommandError> {
    let Some(file) = page.accepted(ticket).cloned() else {
        return Err(CommandError::StaleRead { ticket });
    };

    match result {
        Ok(bytes) => {
            let image = SelectedImage::new(file, bytes);
            page.set_preview(Preview::Image {
                data_url: image.data_url(),
                alt: fitcheck_ui::constants::PREVIEW_ALT.to_string(),
            });
            page.store_bytes(ticket, image.bytes);
            Ok(Task::None)
        }
        Err(e) => {
            page.set_preview(Preview::Error(
                fitcheck_ui::constants::PREVIEW_READ_ERROR.to_string(),
            ));
            Err(CommandError::Read(e))
        }
    }
}

/// Handle a click on the analyze button.
///
/// Only a missing file stops the request. When the preview read has not
/// produced the contents yet, the file is read again for the upload.
pub fn handle_analyze_requested<V: View>(page: &mut Page<V>) -> Result<Task, CommandError> {
    if page.analyze_button().busy {
        return Err(CommandError::AnalysisInFlight);
    }

    let task = match page.selection() {
        Selection::None => None,
        Selection::Accepted {
            file,
            bytes: Some(bytes),
            ..
        } => Some(Task::Analyze(SelectedImage::new(file.clone(), bytes.clone()))),
        Selection::Accepted {
            ticket,
            file,
            bytes: None,
        } => Some(Task::ReadUpload {
            ticket: *ticket,
            file: file.clone(),
        }),
    };
    let Some(task) = task else {
        page.notify(text::NO_IMAGE_SELECTED, Severity::Warning);
        return Err(CommandError::NoImageSelected);
    };

    page.set_analyze_busy(ANALYZING_LABEL);
    Ok(task)
}

/// Handle the end of a read started for an upload.
///
/// The file read is uploaded even if another file has been picked since
/// the click. A failed read ends the analysis like a failed request.
pub fn handle_upload_read<V: View>(
    page: &mut Page<V>,
    ticket: u64,
    file: ImageFile,
    result: Result<Vec<u8>, String>,
) -> Result<Task, CommandError> {
    match result {
        Ok(bytes) => {
            page.store_bytes(ticket, bytes.clone());
            Ok(Task::Analyze(SelectedImage::new(file, bytes)))
        }
        Err(e) => {
            page.notify(text::ANALYSIS_FAILED, Severity::Danger);
            page.restore_analyze_button();
            Err(CommandError::Read(e))
        }
    }
}

/// Handle the end of an analysis request.
///
/// The button is restored on every path.
pub fn handle_analysis_finished<V: View>(
    page: &mut Page<V>,
    result: Result<AnalysisResult, ClientError>,
) -> Result<Task, CommandError> {
    let outcome = match result {
        Ok(analysis) => {
            page.show_results(render::analysis(&analysis));
            page.notify(text::ANALYSIS_COMPLETE, Severity::Success);
            Ok(Task::None)
        }
        Err(e) => {
            let message = e.server_message().unwrap_or(text::ANALYSIS_FAILED).to_string();
            page.notify(message, Severity::Danger);
            Err(e.into())
        }
    };
    page.restore_analyze_button();
    outcome
}

/// Handle a key press in the chat input; only Enter sends.
pub fn handle_key_pressed<V: View>(page: &mut Page<V>, key: &str) -> Result<Task, CommandError> {
    if key == "Enter" {
        handle_send_requested(page)
    } else {
        Ok(Task::None)
    }
}

/// Handle a send action: post the user's message and start a typing
/// indicator.
///
/// There is no in-flight guard; a second send while a reply is pending
/// starts a second request with its own indicator.
pub fn handle_send_requested<V: View>(page: &mut Page<V>) -> Result<Task, CommandError> {
    let input = page.chat_input();
    let message = input.trim();
    if message.is_empty() {
        return Err(CommandError::EmptyMessage);
    }
    let message = message.to_string();

    page.append_message(ChatEntry::user(message.clone()));
    page.clear_chat_input();
    let typing = page.start_typing();
    Ok(Task::Chat { typing, message })
}

/// Handle the end of a chat request.
///
/// The server's error text is logged by the caller but never shown; the
/// user sees a fixed fallback reply.
pub fn handle_chat_finished<V: View>(
    page: &mut Page<V>,
    typing: TypingId,
    result: Result<String, ClientError>,
) -> Result<Task, CommandError> {
    page.stop_typing(typing);
    match result {
        Ok(reply) => {
            page.append_message(ChatEntry::bot(reply));
            Ok(Task::None)
        }
        Err(e) => {
            page.append_message(ChatEntry::bot(text::CHAT_FALLBACK));
            Err(e.into())
        }
    }
}

/// Handle a click on the chat panel toggle.
pub fn handle_toggle_panel<V: View>(page: &mut Page<V>) -> Result<Task, CommandError> {
    let panel = page.toggle_panel();
    log::debug!("💬 Chat panel: {:?}", panel);
    Ok(Task::None)
}

/// Handle a notice's close button.
pub fn handle_dismiss_notice<V: View>(
    page: &mut Page<V>,
    id: NoticeId,
) -> Result<Task, CommandError> {
    if !page.dismiss_notice(id) {
        log::trace!("Notice {:?} already gone", id);
    }
    Ok(Task::None)
}

/// Handle a timer tick.
pub fn handle_tick<V: View>(page: &mut Page<V>, now: Instant) -> Result<Task, CommandError> {
    let expired = page.expire_notices(now);
    if expired > 0 {
        log::trace!("Expired {} notice(s)", expired);
    }
    Ok(Task::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_IMAGE_BYTES;
    use crate::error::IntakeError;
    use crate::model::Recommendations;
    use fitcheck_ui::{MemoryView, PanelVisibility};
    use web_time::Duration;

    fn page() -> Page<MemoryView> {
        Page::new(MemoryView::new(), Duration::from_millis(5000), None)
    }

    fn png(size: u64) -> ImageFile {
        ImageFile::new("look.png", "image/png", size)
    }

    fn stored_bytes(page: &Page<MemoryView>) -> Option<&[u8]> {
        match page.selection() {
            Selection::Accepted { bytes, .. } => bytes.as_deref(),
            Selection::None => None,
        }
    }

    fn select(page: &mut Page<MemoryView>, file: ImageFile) -> u64 {
        match handle_image_selected(page, Some(file), MAX_IMAGE_BYTES).unwrap() {
            Task::ReadImage { ticket, .. } => ticket,
            other => panic!("expected a read task, got {other:?}"),
        }
    }

    fn ready_page() -> Page<MemoryView> {
        let mut page = page();
        let Task::ReadImage { ticket, .. } =
            handle_image_selected(&mut page, Some(png(4)), MAX_IMAGE_BYTES).unwrap()
        else {
            panic!("expected a read task");
        };
        handle_image_read(&mut page, ticket, Ok(vec![1, 2, 3, 4])).unwrap();
        page
    }

    #[test]
    fn test_no_file_is_silent() {
        let mut page = page();
        let task = handle_image_selected(&mut page, None, MAX_IMAGE_BYTES).unwrap();
        assert!(task.is_none());
        assert!(page.view().notices.is_empty());
        assert!(page.view().preview_history.is_empty());
    }

    #[test]
    fn test_non_image_rejected_once() {
        let mut page = page();
        let file = ImageFile::new("notes.txt", "text/plain", 10);
        let err = handle_image_selected(&mut page, Some(file), MAX_IMAGE_BYTES).unwrap_err();

        assert!(matches!(err, CommandError::Intake(IntakeError::NotAnImage { .. })));
        assert_eq!(page.view().notices.len(), 1);
        assert_eq!(
            page.view().notices[0].message,
            "Please select an image file (JPEG, PNG)"
        );
        assert_eq!(page.view().notices[0].severity, Severity::Warning);
        assert!(page.view().preview_history.is_empty());
        assert_eq!(page.selection(), &Selection::None);
    }

    #[test]
    fn test_oversized_rejected() {
        let mut page = page();
        let err =
            handle_image_selected(&mut page, Some(png(MAX_IMAGE_BYTES + 1)), MAX_IMAGE_BYTES)
                .unwrap_err();
        assert!(matches!(err, CommandError::Intake(IntakeError::TooLarge { .. })));
        assert_eq!(page.view().notices[0].message, "Image must be less than 5MB");
    }

    #[test]
    fn test_rejection_keeps_previous_selection() {
        let mut page = ready_page();
        let before = page.selection().clone();
        let _ = handle_image_selected(
            &mut page,
            Some(ImageFile::new("a.pdf", "application/pdf", 1)),
            MAX_IMAGE_BYTES,
        );
        assert_eq!(page.selection(), &before);
        assert!(page.preview().is_image());
    }

    #[test]
    fn test_spinner_then_image() {
        let mut page = page();
        let task = handle_image_selected(&mut page, Some(png(3)), MAX_IMAGE_BYTES).unwrap();
        assert!(page.preview().is_loading());
        let Task::ReadImage { ticket, file } = task else {
            panic!("expected a read task");
        };
        assert_eq!(file, png(3));

        handle_image_read(&mut page, ticket, Ok(vec![1, 2, 3])).unwrap();
        let history = &page.view().preview_history;
        assert_eq!(history.len(), 2);
        assert!(history[0].is_loading());
        assert!(history[1].is_image());
        assert_eq!(stored_bytes(&page), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_read_error_shown_inline() {
        let mut page = page();
        let Task::ReadImage { ticket, .. } =
            handle_image_selected(&mut page, Some(png(3)), MAX_IMAGE_BYTES).unwrap()
        else {
            panic!("expected a read task");
        };
        let err = handle_image_read(&mut page, ticket, Err("NotReadableError".into())).unwrap_err();
        assert_eq!(err, CommandError::Read("NotReadableError".into()));
        assert_eq!(page.preview(), &Preview::Error("Error loading image".into()));
        assert!(page.view().notices.is_empty());
    }

    #[test]
    fn test_stale_read_ignored() {
        let mut page = page();
        let Task::ReadImage { ticket: first, .. } =
            handle_image_selected(&mut page, Some(png(3)), MAX_IMAGE_BYTES).unwrap()
        else {
            panic!("expected a read task");
        };
        let Task::ReadImage { ticket: second, .. } =
            handle_image_selected(&mut page, Some(png(5)), MAX_IMAGE_BYTES).unwrap()
        else {
            panic!("expected a read task");
        };

        let err = handle_image_read(&mut page, first, Ok(vec![0; 3])).unwrap_err();
        assert_eq!(err, CommandError::StaleRead { ticket: first });
        assert!(page.preview().is_loading());

        handle_image_read(&mut page, second, Ok(vec![0; 5])).unwrap();
        assert_eq!(stored_bytes(&page).map(<[u8]>::len), Some(5));
    }

    #[test]
    fn test_analyze_without_image_warns() {
        let mut page = page();
        let err = handle_analyze_requested(&mut page).unwrap_err();
        assert_eq!(err, CommandError::NoImageSelected);
        assert_eq!(page.view().notices[0].message, "Please upload an image first");
        assert!(page.view().analyze_button.is_none());
        assert!(page.analyze_button().enabled);
    }

    #[test]
    fn test_analyze_disables_button() {
        let mut page = ready_page();
        let task = handle_analyze_requested(&mut page).unwrap();
        assert!(matches!(task, Task::Analyze(_)));
        assert!(!page.analyze_button().enabled);
        assert_eq!(page.analyze_button().label, "Analyzing...");

        assert_eq!(
            handle_analyze_requested(&mut page).unwrap_err(),
            CommandError::AnalysisInFlight
        );
    }

    #[test]
    fn test_analyze_after_read_error_reads_for_upload() {
        let mut page = page();
        let ticket = select(&mut page, png(3));
        handle_image_read(&mut page, ticket, Err("NotReadableError".into())).unwrap_err();

        let task = handle_analyze_requested(&mut page).unwrap();
        assert_eq!(task, Task::ReadUpload { ticket, file: png(3) });
        assert!(page.view().notices.is_empty());
        assert!(page.analyze_button().busy);
        assert_eq!(page.preview(), &Preview::Error("Error loading image".into()));

        let task = handle_upload_read(&mut page, ticket, png(3), Ok(vec![7, 8, 9])).unwrap();
        let Task::Analyze(image) = task else {
            panic!("expected an upload task");
        };
        assert_eq!(image.file, png(3));
        assert_eq!(image.bytes, vec![7, 8, 9]);
    }

    #[test]
    fn test_analyze_while_preview_reading() {
        let mut page = page();
        let ticket = select(&mut page, png(3));
        assert!(page.preview().is_loading());

        let task = handle_analyze_requested(&mut page).unwrap();
        assert!(matches!(task, Task::ReadUpload { ticket: t, .. } if t == ticket));
        assert!(page.view().notices.is_empty());

        // The preview read still completes normally afterwards
        handle_image_read(&mut page, ticket, Ok(vec![1, 2, 3])).unwrap();
        assert!(page.preview().is_image());
        assert_eq!(stored_bytes(&page), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_upload_read_failure_restores_button() {
        let mut page = page();
        let ticket = select(&mut page, png(3));
        handle_analyze_requested(&mut page).unwrap();

        let err = handle_upload_read(&mut page, ticket, png(3), Err("gone".into())).unwrap_err();
        assert_eq!(err, CommandError::Read("gone".into()));
        assert_eq!(page.view().notices[0].message, "Analysis failed. Please try again.");
        assert_eq!(page.view().notices[0].severity, Severity::Danger);
        assert!(page.analyze_button().enabled);
        assert_eq!(page.analyze_button().label, "Analyze");
    }

    #[test]
    fn test_upload_read_after_new_pick_keeps_new_selection() {
        let mut page = page();
        let first = select(&mut page, png(3));
        handle_analyze_requested(&mut page).unwrap();
        let second = select(&mut page, ImageFile::new("other.png", "image/png", 2));

        let task = handle_upload_read(&mut page, first, png(3), Ok(vec![1, 2, 3])).unwrap();
        assert!(matches!(task, Task::Analyze(ref image) if image.file == png(3)));
        assert_eq!(stored_bytes(&page), None);
        assert_eq!(page.accepted(second).map(|f| f.name.as_str()), Some("other.png"));
    }

    #[test]
    fn test_analysis_success_renders_and_restores() {
        let mut page = ready_page();
        handle_analyze_requested(&mut page).unwrap();
        let result = AnalysisResult {
            body_type: "Pear".into(),
            skin_tone: "Warm".into(),
            recommendations: Recommendations {
                colors: vec!["red".into(), "blue".into()],
                outfits: vec!["dress".into(), "jeans".into()],
            },
        };
        handle_analysis_finished(&mut page, Ok(result)).unwrap();

        let html = page.view().results.as_deref().unwrap();
        assert_eq!(html.matches(r#"class="badge"#).count(), 2);
        assert_eq!(page.view().notices[0].message, "Analysis complete!");
        assert_eq!(page.view().notices[0].severity, Severity::Success);
        assert!(page.analyze_button().enabled);
        assert_eq!(page.analyze_button().label, "Analyze");
    }

    #[test]
    fn test_analysis_failure_uses_server_message() {
        let mut page = ready_page();
        handle_analyze_requested(&mut page).unwrap();
        let err = ClientError::Http {
            status: 400,
            message: Some("Invalid file type".into()),
        };
        assert!(handle_analysis_finished(&mut page, Err(err)).is_err());
        assert_eq!(page.view().notices[0].message, "Invalid file type");
        assert_eq!(page.view().notices[0].severity, Severity::Danger);
        assert!(page.results().is_none());
        assert!(page.analyze_button().enabled);
    }

    #[test]
    fn test_chat_whitespace_is_noop() {
        let mut page = page();
        for input in ["", "   ", "\n\t"] {
            page.view_mut().type_input(input);
            assert_eq!(
                handle_send_requested(&mut page).unwrap_err(),
                CommandError::EmptyMessage
            );
        }
        assert!(page.transcript().is_empty());
        assert!(page.view().typing.is_empty());
    }

    #[test]
    fn test_send_trims_and_clears() {
        let mut page = page();
        page.view_mut().type_input("  hello  ");
        let Task::Chat { typing, message } = handle_send_requested(&mut page).unwrap() else {
            panic!("expected a chat task");
        };
        assert_eq!(message, "hello");
        assert_eq!(page.view().messages, vec![ChatEntry::user("hello")]);
        assert!(page.view().input.is_empty());
        assert_eq!(page.view().typing, vec![typing]);
    }

    #[test]
    fn test_only_enter_sends() {
        let mut page = page();
        page.view_mut().type_input("hi");
        assert!(handle_key_pressed(&mut page, "a").unwrap().is_none());
        assert!(page.transcript().is_empty());
        assert!(matches!(
            handle_key_pressed(&mut page, "Enter").unwrap(),
            Task::Chat { .. }
        ));
    }

    #[test]
    fn test_concurrent_chats_remove_own_indicator() {
        let mut page = page();
        page.view_mut().type_input("one");
        let Task::Chat { typing: first, .. } = handle_send_requested(&mut page).unwrap() else {
            panic!("expected a chat task");
        };
        page.view_mut().type_input("two");
        let Task::Chat { typing: second, .. } = handle_send_requested(&mut page).unwrap() else {
            panic!("expected a chat task");
        };

        handle_chat_finished(&mut page, second, Ok("reply two".into())).unwrap();
        assert_eq!(page.view().typing, vec![first]);
        handle_chat_finished(&mut page, first, Ok("reply one".into())).unwrap();
        assert!(page.view().typing.is_empty());
        assert_eq!(page.transcript().len(), 4);
    }

    #[test]
    fn test_notice_dismiss_and_expire() {
        let mut page = page();
        page.notify("first", Severity::Warning);
        page.notify("second", Severity::Warning);
        let first = page.notices().iter().next().unwrap().id;

        handle_dismiss_notice(&mut page, first).unwrap();
        assert_eq!(page.view().notices.len(), 1);

        handle_tick(&mut page, Instant::now() + Duration::from_millis(5001)).unwrap();
        assert!(page.view().notices.is_empty());
        assert!(page.notices().is_empty());
    }

    #[test]
    fn test_dismiss_after_expiry_is_noop() {
        let mut page = page();
        page.notify("short lived", Severity::Success);
        let id = page.notices().iter().next().unwrap().id;
        handle_tick(&mut page, Instant::now() + Duration::from_millis(5001)).unwrap();

        assert!(handle_dismiss_notice(&mut page, id).unwrap().is_none());
        assert!(page.view().notices.is_empty());
    }

    #[test]
    fn test_panel_starts_from_view() {
        let page = Page::new(
            MemoryView::with_panel(PanelVisibility::Hidden),
            Duration::from_millis(5000),
            None,
        );
        assert_eq!(page.panel(), PanelVisibility::Hidden);

        let page = Page::new(
            MemoryView::with_panel(PanelVisibility::Hidden),
            Duration::from_millis(5000),
            Some(PanelVisibility::Shown),
        );
        assert_eq!(page.panel(), PanelVisibility::Shown);
        assert_eq!(page.view().panel, PanelVisibility::Shown);
    }
}
