//! Domain layer - Core values and rules
//!
//! Contains value objects and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod level;
pub mod routing;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use level::{percent_from_dbfs, LevelMeter, MicLevel};
pub use routing::{Browser, Handler, Matcher, RuleSet, UrlRewrite};
