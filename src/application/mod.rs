//! Application layer - Use cases and port interfaces
//!
//! Contains the probe workflow and trait definitions
//! for external system interactions.

pub mod ports;
pub mod probe;

// Re-export use cases
pub use probe::{MicLevelProbe, SAMPLE_WINDOW};
