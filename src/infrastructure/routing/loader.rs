//! Rule set file loader

use std::path::Path;

use tokio::fs;

use crate::domain::error::RuleSetError;
use crate::domain::routing::RuleSet;

/// On-disk rule set formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSetFormat {
    Toml,
    Json,
}

impl RuleSetFormat {
    /// Pick the format from the file extension. No extension means TOML.
    pub fn from_path(path: &Path) -> Result<Self, RuleSetError> {
        match path.extension().and_then(|e| e.to_str()) {
            None => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) => Err(RuleSetError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Parse and validate rule set content
pub fn parse_rule_set(content: &str, format: RuleSetFormat) -> Result<RuleSet, RuleSetError> {
    let rules: RuleSet = match format {
        RuleSetFormat::Toml => {
            toml::from_str(content).map_err(|e| RuleSetError::ParseError(e.to_string()))?
        }
        RuleSetFormat::Json => serde_json::from_str(content)
            .map_err(|e| RuleSetError::ParseError(e.to_string()))?,
    };

    rules.validate()?;
    Ok(rules)
}

/// Read, parse and validate a rule set file
pub async fn load_rule_set(path: &Path) -> Result<RuleSet, RuleSetError> {
    let format = RuleSetFormat::from_path(path)?;

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| RuleSetError::ReadError(format!("{}: {}", path.display(), e)))?;

    let rules = parse_rule_set(&content, format)?;
    tracing::debug!(
        path = %path.display(),
        handlers = rules.handlers.len(),
        "rule set loaded"
    );
    Ok(rules)
}
