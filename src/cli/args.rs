//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// deskkit - desktop configuration helpers
#[derive(Parser, Debug)]
#[command(name = "deskkit")]
#[command(version)]
#[command(about = "Browser routing rule sets and a microphone level probe for status bars")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current microphone input level (0-100) or OFF
    Mic,
    /// Check, show or export a browser routing rule set
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Rule set action subcommands
#[derive(Subcommand, Debug)]
pub enum RulesAction {
    /// Validate a rule set file
    Check {
        /// Rule set file (.toml or .json); defaults to rules.path
        path: Option<PathBuf>,
    },
    /// Print the handlers of a rule set
    Show {
        /// Rule set file (.toml or .json); defaults to rules.path
        path: Option<PathBuf>,
    },
    /// Render a rule set as a finicky config file
    Export {
        /// Rule set file (.toml or .json); defaults to rules.path
        path: Option<PathBuf>,
        /// Write to this file instead of stdout (default: rules.export_path)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["log_level", "log_file", "rules.path", "rules.export_path"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
