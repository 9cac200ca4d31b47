/// Headless fitcheck driver for native builds.
///
/// Runs the same controller as the page against a live backend, with an
/// in-memory view, and prints what the page would show.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use clap::{Parser, Subcommand};
    use fitcheck::config::{AppConfig, ConfigError};
    use fitcheck::model::ImageFile;
    use fitcheck::{FitcheckApp, HttpClient, Message, Task, intake};
    use fitcheck_ui::{MemoryView, Preview, Sender};

    /// Backend used when neither the flag nor the config names one
    const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

    #[derive(Parser, Debug)]
    #[command(name = "fitcheck", version, about = "Fashion analysis client")]
    struct Cli {
        /// Backend base URL (overrides the config file)
        #[arg(long)]
        server: Option<String>,

        /// Config file (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Upload a photo for analysis and print the results
        Analyze {
            /// Image file to upload
            path: PathBuf,
        },
        /// Send one chat message and print the transcript
        Chat {
            /// Message text
            #[arg(required = true, num_args = 1..)]
            message: Vec<String>,
        },
    }

    #[derive(Debug, thiserror::Error)]
    pub enum CliError {
        #[error(transparent)]
        Config(#[from] ConfigError),

        #[error("I/O error: {0}")]
        Io(#[from] std::io::Error),
    }

    pub fn run() -> Result<(), CliError> {
        let cli = Cli::parse();

        let mut config = match &cli.config {
            Some(path) => AppConfig::load_from_path(path)?,
            None => AppConfig::load_from_default_path().unwrap_or_default(),
        };
        if let Some(server) = cli.server {
            config.api.base_url = Some(server);
        }

        env_logger::Builder::new()
            .filter_level(config.log_level.to_level_filter())
            .parse_default_env()
            .init();

        let client = HttpClient::new(&config.base_url_or(DEFAULT_SERVER), &config.api);
        let mut app = FitcheckApp::new(client, MemoryView::new(), &config);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        match cli.command {
            Command::Analyze { path } => runtime.block_on(analyze(&mut app, &path))?,
            Command::Chat { message } => {
                app.view_mut().type_input(message.join(" "));
                runtime.block_on(app.run(Message::SendRequested));
                print_transcript(app.view());
            }
        }

        print_notices(app.view());
        Ok(())
    }

    async fn analyze(
        app: &mut FitcheckApp<HttpClient, MemoryView>,
        path: &Path,
    ) -> Result<(), CliError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = ImageFile::new(&name, intake::sniff_mime(&name, &bytes), bytes.len() as u64);

        if let Task::ReadImage { ticket, .. } = app.run(Message::ImageSelected(Some(file))).await {
            app.run(Message::ImageRead {
                ticket,
                result: Ok(bytes.clone()),
            })
            .await;
        }
        if let Preview::Error(message) = &app.view().preview {
            println!("{}", message);
        }

        if let Task::ReadUpload { ticket, file } = app.run(Message::AnalyzeRequested).await {
            app.run(Message::UploadRead {
                ticket,
                file,
                result: Ok(bytes),
            })
            .await;
        }
        if let Some(results) = &app.view().results {
            println!("{}", results);
        }
        Ok(())
    }

    fn print_transcript(view: &MemoryView) {
        for entry in &view.messages {
            let who = match entry.sender {
                Sender::User => "you",
                Sender::Bot => "stylist",
            };
            println!("{:>8}: {}", who, entry.text);
        }
    }

    fn print_notices(view: &MemoryView) {
        for notice in &view.notices {
            eprintln!("[{}] {}", notice.severity.as_str(), notice.message);
        }
    }
}
