//! "Page fully rendered" checks applied to a fetched document.
//!
//! Search pages are sometimes served as a shell (consent walls, bot checks,
//! partial renders) with a 200 status. [`PageFetcher`](crate::PageFetcher)
//! only accepts a response whose parsed document passes its [`LoadCheck`];
//! anything else counts as a soft failure and is retried.

use scraper::{Html, Selector};

use crate::error::ScraperError;

/// Selector for the product title span, present once search results render.
pub const SEARCH_RESULTS_MARKER: &str = "span.a-size-base-plus.a-color-base.a-text-normal";

/// Predicate deciding whether a fetched document rendered its essential content.
pub trait LoadCheck: Send + Sync {
    fn is_loaded(&self, document: &Html) -> bool;
}

impl<F> LoadCheck for F
where
    F: Fn(&Html) -> bool + Send + Sync,
{
    fn is_loaded(&self, document: &Html) -> bool {
        self(document)
    }
}

/// Passes when the document contains at least one element matching a selector.
#[derive(Debug)]
pub struct MarkerCheck {
    selector: Selector,
}

impl MarkerCheck {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if `css` does not parse.
    pub fn new(css: &str) -> Result<Self, ScraperError> {
        let selector = Selector::parse(css).map_err(|e| ScraperError::InvalidSelector {
            selector: css.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { selector })
    }

    /// The marker used for marketplace search-result pages.
    #[must_use]
    pub fn search_results() -> Self {
        Self {
            selector: crate::extract::title_selector().clone(),
        }
    }
}

impl LoadCheck for MarkerCheck {
    fn is_loaded(&self, document: &Html) -> bool {
        document.select(&self.selector).next().is_some()
    }
}
