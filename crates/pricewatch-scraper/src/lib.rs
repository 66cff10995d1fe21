pub mod client;
pub mod error;
pub mod extract;
pub mod readiness;
pub mod user_agent;

pub use client::{FetchedPage, PageFetcher};
pub use error::ScraperError;
pub use extract::extract_products;
pub use readiness::{LoadCheck, MarkerCheck};
