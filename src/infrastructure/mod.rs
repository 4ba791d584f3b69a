//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio stack, the filesystem and tracing.

pub mod audio;
pub mod config;
pub mod logging;
pub mod routing;

// Re-export adapters
pub use audio::{create_session, CpalSession};
pub use config::XdgConfigStore;
pub use logging::{init_logging, LogTarget};
pub use routing::{load_rule_set, render_finicky};
