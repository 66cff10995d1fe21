use pricewatch_core::{AppConfig, ProductRecord};

use crate::csv_export::{to_csv, REPORT_FILE_NAME};
use crate::error::ReportError;
use crate::telegram::TelegramClient;

pub const REPORT_CAPTION: &str = "Here is the scraped data.";
const CSV_MIME: &str = "text/csv";

/// Serializes a run's records and delivers them as a single CSV attachment.
#[derive(Debug)]
pub struct Reporter {
    telegram: TelegramClient,
}

impl Reporter {
    #[must_use]
    pub fn new(telegram: TelegramClient) -> Self {
        Self { telegram }
    }

    /// Builds a reporter for the configured bot, chat, and API base.
    ///
    /// # Errors
    ///
    /// Propagates [`TelegramClient::with_base_url`] failures.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ReportError> {
        let telegram = TelegramClient::with_base_url(
            &config.telegram_token,
            &config.telegram_chat_id,
            config.request_timeout_secs,
            &config.telegram_api_url,
        )?;
        Ok(Self::new(telegram))
    }

    /// Uploads `records` as `scraped_data.csv`. An empty slice still sends a
    /// header-only file.
    ///
    /// # Errors
    ///
    /// Returns the [`ReportError`] from CSV rendering or the upload. Callers
    /// decide whether to log or propagate; nothing is retried.
    pub async fn report(&self, records: &[ProductRecord]) -> Result<(), ReportError> {
        let csv = to_csv(records)?;
        tracing::debug!(
            records = records.len(),
            bytes = csv.len(),
            "report: uploading CSV"
        );
        self.telegram
            .send_document(REPORT_FILE_NAME, csv.into_bytes(), CSV_MIME, REPORT_CAPTION)
            .await
    }
}
