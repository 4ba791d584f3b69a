//! Status-bar microphone level probe
//!
//! Takes no arguments. Prints the current input level as 0-100, or OFF
//! when the microphone cannot be sampled, and always exits 0. Nothing is
//! written to stderr; diagnostics go to the configured log file only.

use std::panic;
use std::process::ExitCode;

use deskkit::cli::{load_config, probe_mic_level, Presenter};
use deskkit::infrastructure::{init_logging, LogTarget};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // keep panic messages off stderr
    panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "panic");
    }));

    let config = load_config().await;
    let _ = init_logging(&config, LogTarget::FileOnly);

    let level = probe_mic_level().await;
    Presenter::new().output(&level.to_string());

    ExitCode::SUCCESS
}
