//! Minimal Telegram Bot API client for uploading documents.
//!
//! The bot token is part of the request path
//! (`/bot<token>/sendDocument`), so every `reqwest::Error` surfaced from here
//! has its URL stripped before it can reach a log line.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::error::ReportError;

const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Error envelope Telegram returns alongside non-200 statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    description: Option<String>,
}

pub struct TelegramClient {
    client: Client,
    token: String,
    chat_id: String,
    base_url: Url,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("token", &"[redacted]")
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Creates a client pointed at the public Bot API.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, chat_id: &str, timeout_secs: u64) -> Result<Self, ReportError> {
        Self::with_base_url(token, chat_id, timeout_secs, DEFAULT_API_URL)
    }

    /// Creates a client with a custom API base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the HTTP client cannot be built, or
    /// [`ReportError::InvalidApiUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        token: &str,
        chat_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pricewatch/0.1 (report-upload)")
            .build()
            .map_err(ReportError::Http)?;

        // Ensure exactly one trailing slash so `join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ReportError::InvalidApiUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            chat_id: chat_id.to_owned(),
            base_url,
        })
    }

    /// Uploads `content` as a document named `file_name` to the configured chat.
    ///
    /// Succeeds only on HTTP 200. No retry is attempted.
    ///
    /// # Errors
    ///
    /// - [`ReportError::UnexpectedStatus`] for any non-200 response, with
    ///   Telegram's `description` when the body carries one.
    /// - [`ReportError::Http`] on network failure (URL stripped).
    /// - [`ReportError::InvalidApiUrl`] if the method URL cannot be built.
    pub async fn send_document(
        &self,
        file_name: &str,
        content: Vec<u8>,
        mime: &str,
        caption: &str,
    ) -> Result<(), ReportError> {
        let url = self.method_url("sendDocument")?;

        let document = Part::bytes(content)
            .file_name(file_name.to_owned())
            .mime_str(mime)
            .map_err(|e| ReportError::Http(e.without_url()))?;

        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_owned())
            .part("document", document);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ReportError::Http(e.without_url()))?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let description = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
            .and_then(|body| body.description);

        Err(ReportError::UnexpectedStatus {
            status: status.as_u16(),
            description,
        })
    }

    /// Leading `./` keeps the token's `:` from being read as a URL scheme.
    fn method_url(&self, method: &str) -> Result<Url, ReportError> {
        self.base_url
            .join(&format!("./bot{}/{method}", self.token))
            .map_err(|e| ReportError::InvalidApiUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}
