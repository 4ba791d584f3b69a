//! Domain error types

use thiserror::Error;

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

/// Error when loading or validating a routing rule set.
///
/// Handler indices are 1-based, matching the order in the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    #[error("Failed to read rule set: {0}")]
    ReadError(String),

    #[error("Failed to parse rule set: {0}")]
    ParseError(String),

    #[error("Failed to write {0}")]
    WriteError(String),

    #[error("Unsupported rule set format: \"{0}\". Use a .toml or .json file")]
    UnsupportedFormat(String),

    #[error("defaultBrowser must not be empty")]
    EmptyDefaultBrowser,

    #[error("Handler #{index}: match list is empty")]
    EmptyMatch { index: usize },

    #[error("Handler #{index}: match pattern is empty")]
    EmptyPattern { index: usize },

    #[error("Handler #{index}: hostname list is empty")]
    EmptyHostnames { index: usize },

    #[error("Handler #{index}: invalid hostname \"{hostname}\"")]
    InvalidHostname { index: usize, hostname: String },

    #[error("Handler #{index}: browser name is empty")]
    EmptyBrowserName { index: usize },

    #[error("Handler #{index}: browser profile is empty")]
    EmptyProfile { index: usize },

    #[error("Handler #{index}: invalid url protocol \"{protocol}\"")]
    InvalidProtocol { index: usize, protocol: String },
}
