pub mod app_config;
pub mod config;
pub mod products;
pub mod schedule;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{ProductRecord, FIELD_NAMES, NOT_AVAILABLE};
pub use schedule::TriggerTime;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
