//! Configuration values

mod app_config;

pub use app_config::{AppConfig, RulesConfig, DEFAULT_LOG_LEVEL, VALID_LOG_LEVELS};
