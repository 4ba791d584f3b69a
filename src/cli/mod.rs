//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting,
//! and the command runners shared by both binaries.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod rules_cmd;

// Re-export commonly used types
pub use app::{load_config, probe_mic_level, run_mic, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands, ConfigAction, RulesAction};
pub use presenter::Presenter;
