//! Shared runners for the binaries

use std::path::PathBuf;
use std::process::ExitCode;

use crate::application::ports::ConfigStore;
use crate::application::MicLevelProbe;
use crate::domain::config::AppConfig;
use crate::domain::level::MicLevel;
use crate::infrastructure::{create_session, XdgConfigStore};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Load the config file over the defaults. A broken file counts as empty.
pub async fn load_config() -> AppConfig {
    let store = XdgConfigStore::new();
    AppConfig::defaults().merge(store.load_or_empty().await)
}

/// Sample the microphone once.
///
/// The capture runs on a blocking thread (cpal streams are not `Send`);
/// a failed or panicked task reports `Off`.
pub async fn probe_mic_level() -> MicLevel {
    let task = tokio::task::spawn_blocking(|| MicLevelProbe::new(create_session()).run());

    match task.await {
        Ok(level) => level,
        Err(e) => {
            tracing::debug!(error = %e, "probe task failed");
            MicLevel::Off
        }
    }
}

/// Print the microphone level. Always succeeds.
pub async fn run_mic(presenter: &Presenter) -> ExitCode {
    let level = probe_mic_level().await;
    presenter.output(&level.to_string());
    ExitCode::from(EXIT_SUCCESS)
}

/// Rule set path: command line, then config, then the default location
pub fn resolve_rules_path(arg: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    arg.or_else(|| config.rules_path())
        .unwrap_or_else(XdgConfigStore::default_rules_path)
}
