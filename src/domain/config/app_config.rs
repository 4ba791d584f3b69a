//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Log levels accepted by `log_level`, quietest first.
pub const VALID_LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Default log level. The probe's stderr must stay clean, so nothing is
/// logged unless asked for.
pub const DEFAULT_LOG_LEVEL: &str = "off";

/// Routing rule set settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub path: Option<String>,
    pub export_path: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub rules: Option<RulesConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
            log_file: None,
            rules: Some(RulesConfig::default()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            log_level: other.log_level.or(self.log_level),
            log_file: other.log_file.or(self.log_file),
            rules: Self::merge_rules_config(self.rules, other.rules),
        }
    }

    fn merge_rules_config(
        base: Option<RulesConfig>,
        other: Option<RulesConfig>,
    ) -> Option<RulesConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(RulesConfig {
                path: o.path.or(b.path),
                export_path: o.export_path.or(b.export_path),
            }),
        }
    }

    /// Get log level (case-insensitive), or "off" if not set or unrecognised
    pub fn log_level_or_default(&self) -> &'static str {
        let Some(level) = self.log_level.as_deref().map(str::trim) else {
            return DEFAULT_LOG_LEVEL;
        };
        VALID_LOG_LEVELS
            .iter()
            .find(|valid| valid.eq_ignore_ascii_case(level))
            .copied()
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log file path, if configured
    pub fn log_file_path(&self) -> Option<PathBuf> {
        non_empty_path(self.log_file.as_deref())
    }

    /// Rule set path, if configured
    pub fn rules_path(&self) -> Option<PathBuf> {
        non_empty_path(self.rules.as_ref().and_then(|r| r.path.as_deref()))
    }

    /// Export destination, if configured
    pub fn export_path(&self) -> Option<PathBuf> {
        non_empty_path(self.rules.as_ref().and_then(|r| r.export_path.as_deref()))
    }
}

fn non_empty_path(value: Option<&str>) -> Option<PathBuf> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(expand_home)
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.log_level, Some("off".to_string()));
        assert!(config.log_file.is_none());
        assert_eq!(config.rules, Some(RulesConfig::default()));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.log_level.is_none());
        assert!(config.log_file.is_none());
        assert!(config.rules.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            log_level: Some("info".to_string()),
            log_file: Some("/tmp/base.log".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            log_level: Some("debug".to_string()),
            log_file: None, // Should not override
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.log_level, Some("debug".to_string()));
        assert_eq!(merged.log_file, Some("/tmp/base.log".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            log_level: Some("warn".to_string()),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());
        assert_eq!(merged.log_level, Some("warn".to_string()));
    }

    #[test]
    fn merge_rules_config() {
        let base = AppConfig {
            rules: Some(RulesConfig {
                path: Some("/base/rules.toml".to_string()),
                export_path: Some("/base/.finicky.js".to_string()),
            }),
            ..Default::default()
        };
        let other = AppConfig {
            rules: Some(RulesConfig {
                path: Some("/other/rules.toml".to_string()),
                export_path: None,
            }),
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.rules_path(), Some(PathBuf::from("/other/rules.toml")));
        assert_eq!(merged.export_path(), Some(PathBuf::from("/base/.finicky.js")));
    }

    #[test]
    fn log_level_or_default() {
        assert_eq!(AppConfig::empty().log_level_or_default(), "off");

        let config = AppConfig {
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        assert_eq!(config.log_level_or_default(), "debug");

        let config = AppConfig {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        assert_eq!(config.log_level_or_default(), "off");

        let config = AppConfig {
            log_level: Some(" DEBUG ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.log_level_or_default(), "debug");
    }

    #[test]
    fn tilde_paths_expand_to_home() {
        let home = dirs::home_dir().unwrap();
        let config = AppConfig {
            log_file: Some("~".to_string()),
            rules: Some(RulesConfig {
                path: Some("~/.config/deskkit/rules.toml".to_string()),
                export_path: Some("~other/.finicky.js".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(config.log_file_path(), Some(home.clone()));
        assert_eq!(
            config.rules_path(),
            Some(home.join(".config/deskkit/rules.toml"))
        );
        // only the current user's home is expanded
        assert_eq!(
            config.export_path(),
            Some(PathBuf::from("~other/.finicky.js"))
        );
    }

    #[test]
    fn blank_paths_are_unset() {
        let config = AppConfig {
            log_file: Some("  ".to_string()),
            rules: Some(RulesConfig {
                path: Some(String::new()),
                export_path: None,
            }),
            ..Default::default()
        };
        assert!(config.log_file_path().is_none());
        assert!(config.rules_path().is_none());
        assert!(config.export_path().is_none());
    }
}
