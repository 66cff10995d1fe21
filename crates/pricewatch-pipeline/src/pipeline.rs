use pricewatch_core::{AppConfig, ProductRecord};
use pricewatch_report::{ReportError, Reporter};
use pricewatch_scraper::{PageFetcher, ScraperError};

use crate::guard::RunGuard;
use crate::job::ScrapeJob;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("scraper setup failed: {0}")]
    Scraper(#[from] ScraperError),

    #[error("report setup failed: {0}")]
    Report(#[from] ReportError),
}

/// Records accumulated across the pages of one run.
#[derive(Debug, Clone, Default)]
pub struct ScrapeResult {
    pub records: Vec<ProductRecord>,
    pub pages_fetched: u32,
    pub pages_skipped: u32,
    /// A fetched page yielded no products, so later pages were not requested.
    pub halted_early: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_fetched: u32,
    pub pages_skipped: u32,
    pub records: usize,
    pub halted_early: bool,
    pub reported: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Another run held the guard; nothing was fetched or sent.
    Skipped,
    Completed(RunSummary),
}

/// One scrape-and-report job: fetch each page, collect its products, and
/// upload everything once at the end.
pub struct Pipeline {
    job: ScrapeJob,
    fetcher: PageFetcher,
    reporter: Reporter,
    guard: RunGuard,
}

impl Pipeline {
    #[must_use]
    pub fn new(job: ScrapeJob, fetcher: PageFetcher, reporter: Reporter) -> Self {
        Self {
            job,
            fetcher,
            reporter,
            guard: RunGuard::new(),
        }
    }

    /// # Errors
    ///
    /// Returns [`PipelineError`] if either HTTP client cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(
            ScrapeJob::from_app_config(config),
            PageFetcher::from_app_config(config)?,
            Reporter::from_app_config(config)?,
        ))
    }

    #[must_use]
    pub fn job(&self) -> &ScrapeJob {
        &self.job
    }

    /// Walks pages `1..=max_pages` in order.
    ///
    /// Every fetched page is followed by the inter-page pause, including the
    /// one with zero products that ends the walk. A page whose fetch gives up
    /// is skipped without the pause.
    pub async fn scrape(&self) -> ScrapeResult {
        let mut result = ScrapeResult::default();

        for page in 1..=self.job.max_pages {
            let url = self.job.page_url(page);
            tracing::info!(page, url = %url, "pipeline: scraping page");

            let Some(fetched) = self.fetcher.fetch(&url).await else {
                tracing::warn!(page, url = %url, "pipeline: skipping page");
                result.pages_skipped += 1;
                continue;
            };

            let products = fetched.products();
            let found = products.len();
            result.pages_fetched += 1;
            result.records.extend(products);
            tracing::info!(page, found, total = result.records.len(), "pipeline: page scraped");

            tokio::time::sleep(self.job.page_delay()).await;

            if found == 0 {
                tracing::info!(page, "pipeline: no products on page; stopping");
                result.halted_early = true;
                break;
            }
        }

        result
    }

    /// Runs one scrape and a single report upload.
    ///
    /// Never panics and never returns an error: upload failures are logged
    /// and reflected in [`RunSummary::reported`]. Returns
    /// [`RunOutcome::Skipped`] when a previous run is still in progress.
    pub async fn run(&self) -> RunOutcome {
        let Some(_permit) = self.guard.try_acquire() else {
            tracing::warn!("pipeline: previous run still in progress; skipping trigger");
            return RunOutcome::Skipped;
        };

        tracing::info!(max_pages = self.job.max_pages, "pipeline: run started");
        let scraped = self.scrape().await;

        let reported = match self.reporter.report(&scraped.records).await {
            Ok(()) => {
                tracing::info!(records = scraped.records.len(), "pipeline: report sent");
                true
            }
            Err(e) => {
                tracing::error!(
                    records = scraped.records.len(),
                    error = %e,
                    "pipeline: report failed"
                );
                false
            }
        };

        let summary = RunSummary {
            pages_fetched: scraped.pages_fetched,
            pages_skipped: scraped.pages_skipped,
            records: scraped.records.len(),
            halted_early: scraped.halted_early,
            reported,
        };
        tracing::info!(?summary, "pipeline: run finished");
        RunOutcome::Completed(summary)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.guard.is_running()
    }
}
