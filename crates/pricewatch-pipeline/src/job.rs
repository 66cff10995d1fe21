use std::time::Duration;

use pricewatch_core::app_config::PAGE_PLACEHOLDER;
use pricewatch_core::AppConfig;
use rand::Rng;

/// What one run scrapes and how it paces itself between pages.
#[derive(Debug, Clone)]
pub struct ScrapeJob {
    /// Search URL with a `{page}` placeholder.
    pub search_url_template: String,
    pub max_pages: u32,
    pub page_delay_min: Duration,
    pub page_delay_max: Duration,
}

impl ScrapeJob {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            search_url_template: config.search_url_template.clone(),
            max_pages: config.max_pages,
            page_delay_min: Duration::from_secs(config.page_delay_min_secs),
            page_delay_max: Duration::from_secs(config.page_delay_max_secs),
        }
    }

    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        self.search_url_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    /// Uniformly random pause in `[page_delay_min, page_delay_max]`.
    ///
    /// A max below min is treated as a fixed delay of `page_delay_min`.
    #[must_use]
    pub fn page_delay(&self) -> Duration {
        let min = self.page_delay_min;
        let max = self.page_delay_max.max(min);
        if min == max {
            return min;
        }
        rand::rng().random_range(min..=max)
    }
}
