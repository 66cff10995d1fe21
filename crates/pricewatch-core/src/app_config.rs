use std::net::SocketAddr;

use chrono_tz::Tz;

use crate::schedule::TriggerTime;

/// Placeholder substituted with the 1-based page index in `search_url_template`.
pub const PAGE_PLACEHOLDER: &str = "{page}";

#[derive(Clone)]
pub struct AppConfig {
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub telegram_api_url: String,
    pub search_url_template: String,
    pub max_pages: u32,
    pub trigger_times: Vec<TriggerTime>,
    pub timezone: Tz,
    pub fetch_attempts: u32,
    pub retry_delay_secs: u64,
    pub page_delay_min_secs: u64,
    pub page_delay_max_secs: u64,
    pub request_timeout_secs: u64,
    pub bind_addr: SocketAddr,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("telegram_token", &"[redacted]")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("search_url_template", &self.search_url_template)
            .field("max_pages", &self.max_pages)
            .field("trigger_times", &self.trigger_times)
            .field("timezone", &self.timezone)
            .field("fetch_attempts", &self.fetch_attempts)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("page_delay_min_secs", &self.page_delay_min_secs)
            .field("page_delay_max_secs", &self.page_delay_max_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .finish()
    }
}
