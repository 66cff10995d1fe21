//! Scrape-and-report run: page loop, accumulation, single upload.

mod guard;
mod job;
mod pipeline;

pub use guard::{RunGuard, RunPermit};
pub use job::ScrapeJob;
pub use pipeline::{Pipeline, PipelineError, RunOutcome, RunSummary, ScrapeResult};
