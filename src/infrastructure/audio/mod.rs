//! Audio infrastructure module
//!
//! Provides the cross-platform audio session used by the microphone probe
//! (cpal) and the FLAC encoder for its temporary capture file.

mod cpal_session;
mod flac_encoder;

pub use cpal_session::{CpalCapture, CpalSession};
pub use flac_encoder::{encode_to_flac, EncodingError};

/// Create the default audio session for the current platform
pub fn create_session() -> CpalSession {
    CpalSession::new()
}
