//! The page controller.
//!
//! [`FitcheckApp`] is constructed once with the view it drives and the
//! client it talks to. Events come in through [`FitcheckApp::update`], which
//! returns the async [`Task`] to run next; [`perform`] runs a task against a
//! client and yields the completion message.
//!
//! `update` and `perform` are split so the browser runtime can keep the app
//! in a `RefCell` without holding a borrow across an await point.

use fitcheck_ui::{PanelVisibility, View};
use web_time::{Duration, Instant};

use crate::client::AdvisorClient;
use crate::config::AppConfig;
use crate::error::CommandError;
use crate::handlers;
use crate::message::{Message, Task};
use crate::page::Page;

/// Page controller generic over the backend client and the view.
pub struct FitcheckApp<C, V> {
    client: C,
    page: Page<V>,
    max_image_bytes: u64,
}

impl<C: AdvisorClient, V: View> FitcheckApp<C, V> {
    pub fn new(client: C, view: V, config: &AppConfig) -> Self {
        let page = Page::new(
            view,
            Duration::from_millis(config.ui.notice_timeout_ms),
            config.ui.chat_panel_visible.map(PanelVisibility::from),
        );
        Self {
            client,
            page,
            max_image_bytes: config.limits.max_image_bytes,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn page(&self) -> &Page<V> {
        &self.page
    }

    pub fn view(&self) -> &V {
        self.page.view()
    }

    pub fn view_mut(&mut self) -> &mut V {
        self.page.view_mut()
    }

    /// Apply a message and return the task it asks for.
    ///
    /// Handler errors are logged here; the user has already been told about
    /// them through the page.
    pub fn update(&mut self, message: Message) -> Task {
        self.try_update(message).unwrap_or_else(|e| {
            log_command_error(&e);
            Task::None
        })
    }

    /// Apply a message, returning the handler's result unchanged.
    pub fn try_update(&mut self, message: Message) -> Result<Task, CommandError> {
        let page = &mut self.page;
        match message {
            Message::ImageSelected(file) => {
                handlers::handle_image_selected(page, file, self.max_image_bytes)
            }
            Message::ImageRead { ticket, result } => {
                handlers::handle_image_read(page, ticket, result)
            }
            Message::AnalyzeRequested => handlers::handle_analyze_requested(page),
            Message::UploadRead {
                ticket,
                file,
                result,
            } => handlers::handle_upload_read(page, ticket, file, result),
            Message::AnalysisFinished(result) => handlers::handle_analysis_finished(page, result),
            Message::SendRequested => handlers::handle_send_requested(page),
            Message::KeyPressed(key) => handlers::handle_key_pressed(page, &key),
            Message::ChatFinished { typing, result } => {
                handlers::handle_chat_finished(page, typing, result)
            }
            Message::ToggleChatPanel => handlers::handle_toggle_panel(page),
            Message::DismissNotice(id) => handlers::handle_dismiss_notice(page, id),
            Message::Tick => handlers::handle_tick(page, Instant::now()),
        }
    }

    /// Apply a message and run every follow-up network task to completion.
    ///
    /// Returns the first task that needs the platform (a file read), or
    /// [`Task::None`].
    pub async fn run(&mut self, message: Message) -> Task {
        let mut task = self.update(message);
        loop {
            match perform(&self.client, task).await {
                Ok(next) => task = self.update(next),
                Err(unperformed) => return unperformed,
            }
        }
    }
}

/// Run a network task against `client`.
///
/// Returns the completion message, or gives the task back when it is not a
/// network task (the file reads and [`Task::None`]).
pub async fn perform<C: AdvisorClient>(client: &C, task: Task) -> Result<Message, Task> {
    match task {
        Task::Analyze(image) => {
            log::info!("🔍 Analyzing {}", image.file.name);
            Ok(Message::AnalysisFinished(client.analyze(&image).await))
        }
        Task::Chat { typing, message } => {
            let result = client.chat(&message).await;
            Ok(Message::ChatFinished { typing, result })
        }
        other => Err(other),
    }
}

fn log_command_error(e: &CommandError) {
    match e {
        CommandError::EmptyMessage | CommandError::StaleRead { .. } => log::debug!("{}", e),
        CommandError::Intake(_)
        | CommandError::NoImageSelected
        | CommandError::AnalysisInFlight => log::warn!("{}", e),
        CommandError::Read(_) => log::error!("Image read error: {}", e),
        CommandError::Client(err) => log::error!("Request error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::model::{AnalysisResult, ImageFile, Recommendations};
    use crate::test_support::{FakeClient, Reply};
    use fitcheck_ui::{ChatEntry, MemoryView, Severity};
    use pollster::block_on;

    fn app(client: FakeClient) -> FitcheckApp<FakeClient, MemoryView> {
        FitcheckApp::new(client, MemoryView::new(), &AppConfig::default())
    }

    fn select_and_read(app: &mut FitcheckApp<FakeClient, MemoryView>) {
        let file = ImageFile::new("look.jpg", "image/jpeg", 3);
        let task = block_on(app.run(Message::ImageSelected(Some(file))));
        let Task::ReadImage { ticket, .. } = task else {
            panic!("expected a read task, got {task:?}");
        };
        assert!(block_on(app.run(Message::ImageRead {
            ticket,
            result: Ok(vec![0xFF, 0xD8, 0xFF]),
        }))
        .is_none());
    }

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            body_type: "Hourglass".into(),
            skin_tone: "Neutral".into(),
            recommendations: Recommendations {
                colors: vec!["red".into(), "blue".into()],
                outfits: vec!["dress".into(), "jeans".into()],
            },
        }
    }

    #[test]
    fn test_analyze_noop_without_file() {
        let client = FakeClient::default();
        let mut app = app(client.clone());
        block_on(app.run(Message::AnalyzeRequested));

        assert!(client.analyzed().is_empty());
        assert!(app.view().analyze_button.is_none());
        assert!(app.view().results.is_none());
        assert_eq!(app.view().notices.len(), 1);
        assert_eq!(app.view().notices[0].severity, Severity::Warning);
    }

    #[test]
    fn test_analyze_success_round_trip() {
        let client = FakeClient::default().with_analysis(Reply::Ok(analysis()));
        let mut app = app(client.clone());
        select_and_read(&mut app);
        block_on(app.run(Message::AnalyzeRequested));

        let uploads = client.analyzed();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].file.name, "look.jpg");
        assert_eq!(uploads[0].bytes, vec![0xFF, 0xD8, 0xFF]);

        let results = app.view().results.as_deref().unwrap();
        assert!(results.contains("Hourglass"));
        assert_eq!(app.view().notices.last().unwrap().message, "Analysis complete!");
    }

    #[test]
    fn test_analyze_after_failed_preview_uploads_file() {
        let client = FakeClient::default().with_analysis(Reply::Ok(analysis()));
        let mut app = app(client.clone());
        let file = ImageFile::new("look.jpg", "image/jpeg", 3);
        let Task::ReadImage { ticket, .. } = block_on(app.run(Message::ImageSelected(Some(file))))
        else {
            panic!("expected a read task");
        };
        block_on(app.run(Message::ImageRead {
            ticket,
            result: Err("NotReadableError".into()),
        }));

        let task = block_on(app.run(Message::AnalyzeRequested));
        let Task::ReadUpload { ticket, file } = task else {
            panic!("expected an upload read, got {task:?}");
        };
        assert!(client.analyzed().is_empty());
        assert!(block_on(app.run(Message::UploadRead {
            ticket,
            file,
            result: Ok(vec![0xFF, 0xD8, 0xFF]),
        }))
        .is_none());

        let uploads = client.analyzed();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].file.name, "look.jpg");
        assert!(app.view().results.is_some());
        assert_eq!(app.view().notices.last().unwrap().message, "Analysis complete!");
        assert!(app.view().analyze_button.as_ref().unwrap().enabled);
    }

    #[test]
    fn test_button_restored_on_every_path() {
        let branches = [
            Reply::Ok(analysis()),
            Reply::Err(ClientError::Http {
                status: 500,
                message: Some("cv2 error".into()),
            }),
            Reply::Err(ClientError::Transport("connection refused".into())),
            Reply::Err(ClientError::Decode("expected value".into())),
        ];
        for reply in branches {
            let client = FakeClient::default().with_analysis(reply);
            let mut app = app(client);
            select_and_read(&mut app);
            block_on(app.run(Message::AnalyzeRequested));

            let button = app.view().analyze_button.clone().unwrap();
            assert!(button.enabled);
            assert!(!button.busy);
            assert_eq!(button.label, "Analyze");
        }
    }

    #[test]
    fn test_analysis_failure_messages() {
        let cases = [
            (
                ClientError::Http {
                    status: 400,
                    message: Some("No selected file".into()),
                },
                "No selected file",
            ),
            (
                ClientError::Http {
                    status: 502,
                    message: None,
                },
                "Analysis failed. Please try again.",
            ),
            (
                ClientError::Transport("dns".into()),
                "Analysis failed. Please try again.",
            ),
        ];
        for (error, expected) in cases {
            let client = FakeClient::default().with_analysis(Reply::Err(error));
            let mut app = app(client);
            select_and_read(&mut app);
            block_on(app.run(Message::AnalyzeRequested));

            let notice = app.view().notices.last().unwrap();
            assert_eq!(notice.message, expected);
            assert_eq!(notice.severity, Severity::Danger);
        }
    }

    #[test]
    fn test_chat_success_round_trip() {
        let client = FakeClient::default().with_chat(Reply::Ok("Try a navy blazer.".into()));
        let mut app = app(client.clone());
        app.view_mut().type_input("hello");

        let task = app.update(Message::SendRequested);
        assert_eq!(app.view().typing.len(), 1);
        assert_eq!(app.view().messages, vec![ChatEntry::user("hello")]);

        let done = block_on(perform(app.client(), task)).unwrap();
        app.update(done);

        assert!(app.view().typing.is_empty());
        assert_eq!(
            app.view().messages,
            vec![ChatEntry::user("hello"), ChatEntry::bot("Try a navy blazer.")]
        );
        assert_eq!(client.chatted(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_chat_failure_shows_fallback_only() {
        let client = FakeClient::default().with_chat(Reply::Err(ClientError::Http {
            status: 500,
            message: Some("Traceback: model exploded".into()),
        }));
        let mut app = app(client);
        app.view_mut().type_input("hello");
        block_on(app.run(Message::SendRequested));

        assert!(app.view().typing.is_empty());
        let bot: Vec<_> = app
            .view()
            .messages
            .iter()
            .filter(|m| m.sender == fitcheck_ui::Sender::Bot)
            .collect();
        assert_eq!(bot.len(), 1);
        assert_eq!(
            bot[0].text,
            "Sorry, I'm having trouble responding. Please try again."
        );
        assert!(
            app.view()
                .messages
                .iter()
                .all(|m| !m.text.contains("Traceback"))
        );
        assert!(app.view().notices.is_empty());
    }

    #[test]
    fn test_empty_chat_sends_nothing() {
        let client = FakeClient::default();
        let mut app = app(client.clone());
        app.view_mut().type_input("   ");
        block_on(app.run(Message::SendRequested));
        block_on(app.run(Message::KeyPressed("Enter".into())));

        assert!(client.chatted().is_empty());
        assert!(app.view().messages.is_empty());
        assert_eq!(app.view().input, "   ");
    }

    #[test]
    fn test_transcript_scrolls_on_every_append() {
        let client = FakeClient::default().with_chat(Reply::Ok("hi".into()));
        let mut app = app(client);
        app.view_mut().type_input("hello");
        block_on(app.run(Message::SendRequested));
        // user message, typing indicator, bot reply
        assert_eq!(app.view().scrolls, 3);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut app = app(FakeClient::default());
        let start = app.page().panel();
        app.update(Message::ToggleChatPanel);
        assert_ne!(app.view().panel, start);
        app.update(Message::ToggleChatPanel);
        assert_eq!(app.view().panel, start);
    }

    #[test]
    fn test_config_overrides_panel_and_limit() {
        let mut config = AppConfig::default();
        config.ui.chat_panel_visible = Some(false);
        config.limits.max_image_bytes = 10;
        let mut app = FitcheckApp::new(FakeClient::default(), MemoryView::new(), &config);
        assert_eq!(app.view().panel, PanelVisibility::Hidden);

        let err = app
            .try_update(Message::ImageSelected(Some(ImageFile::new(
                "a.png",
                "image/png",
                11,
            ))))
            .unwrap_err();
        assert!(matches!(err, CommandError::Intake(_)));
    }
}
