//! Search-page fetcher with a fixed retry bound and request pacing.

use std::time::Duration;

use pricewatch_core::{AppConfig, ProductRecord};
use reqwest::{Client, StatusCode};
use scraper::Html;

use crate::error::ScraperError;
use crate::extract::extract_products;
use crate::readiness::{LoadCheck, MarkerCheck};
use crate::user_agent::random_user_agent;

/// Default number of attempts per page.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// A response that passed the fetcher's [`LoadCheck`].
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub body: String,
}

impl FetchedPage {
    /// Parses the body into a DOM.
    ///
    /// An accepted page is parsed twice: once by the load check inside
    /// [`PageFetcher::fetch`] and again here for extraction. `Html` is not
    /// `Send`, so the fetcher keeps the body and each step parses it where it
    /// is used instead of holding a DOM across an `.await`.
    #[must_use]
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }

    /// Extracts the product records on this page.
    #[must_use]
    pub fn products(&self) -> Vec<ProductRecord> {
        extract_products(&self.document())
    }
}

/// Fetches search-result pages, rotating the `User-Agent` per attempt.
///
/// Every attempt is followed by a fixed pause of `retry_delay`, whatever the
/// outcome. A 200 response that fails the load check earns an additional
/// `retry_delay` before the next attempt. Non-200 statuses and transport
/// errors are treated alike: the attempt is spent and the loop moves on.
pub struct PageFetcher {
    client: Client,
    max_attempts: u32,
    retry_delay: Duration,
    load_check: Box<dyn LoadCheck>,
}

impl PageFetcher {
    /// Creates a fetcher with the search-results [`MarkerCheck`].
    ///
    /// `max_attempts` is clamped to at least one.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        max_attempts: u32,
        retry_delay: Duration,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            max_attempts: max_attempts.max(1),
            retry_delay,
            load_check: Box::new(MarkerCheck::search_results()),
        })
    }

    /// Builds a fetcher from the application's timeout, attempt, and delay settings.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.request_timeout_secs,
            config.fetch_attempts,
            Duration::from_secs(config.retry_delay_secs),
        )
    }

    /// Replaces the check deciding whether a 200 response is fully rendered.
    #[must_use]
    pub fn with_load_check(mut self, check: impl LoadCheck + 'static) -> Self {
        self.load_check = Box::new(check);
        self
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fetches `url`, returning the first fully rendered response.
    ///
    /// Returns `None` once `max_attempts` attempts have failed; no further
    /// request is made for this call.
    pub async fn fetch(&self, url: &str) -> Option<FetchedPage> {
        let max_attempts = self.max_attempts;

        for attempt in 1..=max_attempts {
            let outcome = self.fetch_once(url).await;
            tokio::time::sleep(self.retry_delay).await;

            match outcome {
                Ok(page) if self.is_loaded(&page) => {
                    tracing::debug!(attempt, url, "fetch: page loaded");
                    return Some(page);
                }
                Ok(_) => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        url,
                        "fetch: essential elements not loaded; retrying"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        url,
                        error = %e,
                        "fetch: page unavailable"
                    );
                }
            }
        }

        tracing::error!(
            attempts = max_attempts,
            url,
            "fetch: failed to load essential elements after retries"
        );
        None
    }

    /// One GET with a freshly drawn `User-Agent`. Only `200 OK` is accepted.
    async fn fetch_once(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, random_user_agent())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        Ok(FetchedPage {
            url: url.to_owned(),
            body,
        })
    }

    fn is_loaded(&self, page: &FetchedPage) -> bool {
        let document = page.document();
        self.load_check.is_loaded(&document)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
