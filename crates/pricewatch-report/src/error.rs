use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Network or TLS failure. The request URL is stripped since it embeds the bot token.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not UTF-8: {0}")]
    CsvEncoding(#[from] std::string::FromUtf8Error),

    #[error("Telegram returned HTTP {status}: {}", .description.as_deref().unwrap_or("no description"))]
    UnexpectedStatus {
        status: u16,
        description: Option<String>,
    },

    #[error("invalid Telegram API URL \"{url}\": {reason}")]
    InvalidApiUrl { url: String, reason: String },
}
