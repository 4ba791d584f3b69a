//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio;
pub mod config;

// Re-export common types
pub use audio::{AudioSession, CaptureFormat, CaptureTarget, CleanupError, ProbeError};
pub use config::ConfigStore;
