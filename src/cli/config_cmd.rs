//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, RulesConfig, VALID_LOG_LEVELS};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    let value = value.trim().to_string();

    match key {
        "log_level" => config.log_level = Some(value.to_lowercase()),
        "log_file" => config.log_file = Some(value.clone()),
        "rules.path" => config.rules.get_or_insert_with(RulesConfig::default).path = Some(value.clone()),
        "rules.export_path" => {
            config
                .rules
                .get_or_insert_with(RulesConfig::default)
                .export_path = Some(value.clone())
        }
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    let value = config_value(&config, key);
    presenter.output(value.unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, config_value(&config, key).unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn config_value<'a>(config: &'a AppConfig, key: &str) -> Option<&'a str> {
    let rules = config.rules.as_ref();
    match key {
        "log_level" => config.log_level.as_deref(),
        "log_file" => config.log_file.as_deref(),
        "rules.path" => rules.and_then(|r| r.path.as_deref()),
        "rules.export_path" => rules.and_then(|r| r.export_path.as_deref()),
        _ => None,
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    match key {
        "log_level" => {
            let lower = value.to_lowercase();
            if !VALID_LOG_LEVELS.contains(&lower.as_str()) {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!(
                        "Invalid value '{}'. Valid options: {}",
                        value,
                        VALID_LOG_LEVELS.join(", ")
                    ),
                });
            }
        }
        "log_file" | "rules.path" | "rules.export_path" => {
            if value.is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Path must not be empty".to_string(),
                });
            }
        }
        _ => {}
    }
    Ok(())
}
