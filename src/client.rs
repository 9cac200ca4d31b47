//! HTTP client for the analysis and chat services.
//!
//! The controller only sees the [`AdvisorClient`] trait, so tests can swap in
//! a fake. [`HttpClient`] is the reqwest implementation used by the browser
//! build (fetch underneath) and the native CLI.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::constants::UPLOAD_FIELD;
use crate::error::ClientError;
use crate::model::{AnalysisResult, ChatReply, ChatRequest, ErrorBody, SelectedImage};

/// The two backend calls the page makes.
pub trait AdvisorClient {
    /// Upload an image for analysis (`POST /analyze`, multipart).
    fn analyze(
        &self,
        image: &SelectedImage,
    ) -> impl Future<Output = Result<AnalysisResult, ClientError>>;

    /// Send one chat message and return the bot's reply (`POST /chat`, JSON).
    fn chat(&self, message: &str) -> impl Future<Output = Result<String, ClientError>>;
}

/// reqwest-backed client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    analyze_url: String,
    chat_url: String,
}

impl HttpClient {
    /// Client for the services under `base_url` (scheme and authority,
    /// without trailing slash).
    pub fn new(base_url: &str, api: &ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api)
    }

    /// Same as [`HttpClient::new`] with a preconfigured reqwest client.
    pub fn with_client(http: reqwest::Client, base_url: &str, api: &ApiConfig) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            http,
            analyze_url: join_url(base, &api.analyze_path),
            chat_url: join_url(base, &api.chat_path),
        }
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

impl AdvisorClient for HttpClient {
    async fn analyze(&self, image: &SelectedImage) -> Result<AnalysisResult, ClientError> {
        let mut part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file.name.clone());
        if !image.file.mime.is_empty() {
            part = part.mime_str(&image.file.mime)?;
        }
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, part);

        log::debug!(
            "POST {} ({}, {} bytes)",
            self.analyze_url,
            image.file.name,
            image.bytes.len()
        );
        let response = self.http.post(&self.analyze_url).multipart(form).send().await?;
        read_json(response).await
    }

    async fn chat(&self, message: &str) -> Result<String, ClientError> {
        let body = ChatRequest {
            message: message.to_string(),
        };

        log::debug!("POST {} ({} chars)", self.chat_url, message.len());
        let response = self.http.post(&self.chat_url).json(&body).send().await?;
        let reply: ChatReply = read_json(response).await?;
        Ok(reply.response)
    }
}

/// Decode a 2xx JSON body, or turn a non-2xx response into
/// [`ClientError::Http`] carrying the body's `error` field.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Http {
            status: status.as_u16(),
            message: ErrorBody::message_from(&body),
        });
    }
    decode_body(&body)
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}
