use crate::app_config::{AppConfig, PAGE_PLACEHOLDER};
use crate::schedule::parse_trigger_times;
use crate::ConfigError;

const DEFAULT_SEARCH_URL: &str = "https://www.amazon.in/s?k=two+brothers+organic+farms&page={page}";
const DEFAULT_TRIGGER_TIMES: &str = "00:28,06:05,06:08";
const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation live here, decoupled from the real environment so
/// tests can drive it with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    // Blank credentials are as useless as absent ones.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let telegram_token = require("TELEGRAM_TOKEN")?;
    let telegram_chat_id = require("TELEGRAM_CHAT_ID")?;
    let telegram_api_url = or_default("PRICEWATCH_TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL);

    let search_url_template = or_default("PRICEWATCH_SEARCH_URL", DEFAULT_SEARCH_URL);
    if !search_url_template.contains(PAGE_PLACEHOLDER) {
        return Err(invalid(
            "PRICEWATCH_SEARCH_URL",
            format!("template must contain the {PAGE_PLACEHOLDER} placeholder"),
        ));
    }

    let max_pages = parse_u32("PRICEWATCH_MAX_PAGES", "2")?;
    if max_pages == 0 {
        return Err(invalid("PRICEWATCH_MAX_PAGES", "must be at least 1".to_string()));
    }

    let trigger_times = parse_trigger_times(&or_default(
        "PRICEWATCH_TRIGGER_TIMES",
        DEFAULT_TRIGGER_TIMES,
    ))
    .map_err(|reason| invalid("PRICEWATCH_TRIGGER_TIMES", reason))?;

    let timezone = or_default("PRICEWATCH_TIMEZONE", DEFAULT_TIMEZONE)
        .trim()
        .parse::<chrono_tz::Tz>()
        .map_err(|e| invalid("PRICEWATCH_TIMEZONE", e.to_string()))?;

    let fetch_attempts = parse_u32("PRICEWATCH_FETCH_ATTEMPTS", "3")?;
    if fetch_attempts == 0 {
        return Err(invalid(
            "PRICEWATCH_FETCH_ATTEMPTS",
            "must be at least 1".to_string(),
        ));
    }

    let retry_delay_secs = parse_u64("PRICEWATCH_RETRY_DELAY_SECS", "10")?;
    let page_delay_min_secs = parse_u64("PRICEWATCH_PAGE_DELAY_MIN_SECS", "8")?;
    let page_delay_max_secs = parse_u64("PRICEWATCH_PAGE_DELAY_MAX_SECS", "12")?;
    if page_delay_max_secs < page_delay_min_secs {
        return Err(invalid(
            "PRICEWATCH_PAGE_DELAY_MAX_SECS",
            format!("must be >= PRICEWATCH_PAGE_DELAY_MIN_SECS ({page_delay_min_secs})"),
        ));
    }

    let request_timeout_secs = parse_u64("PRICEWATCH_REQUEST_TIMEOUT_SECS", "30")?;

    let bind_addr = or_default("PRICEWATCH_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PRICEWATCH_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("PRICEWATCH_LOG_LEVEL", "info");

    Ok(AppConfig {
        telegram_token,
        telegram_chat_id,
        telegram_api_url,
        search_url_template,
        max_pages,
        trigger_times,
        timezone,
        fetch_attempts,
        retry_delay_secs,
        page_delay_min_secs,
        page_delay_max_secs,
        request_timeout_secs,
        bind_addr,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
