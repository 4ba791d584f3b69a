//! Rules command handler

use std::path::Path;

use tokio::fs;

use crate::domain::config::AppConfig;
use crate::domain::error::RuleSetError;
use crate::infrastructure::routing::{load_rule_set, render_finicky};

use super::app::resolve_rules_path;
use super::args::RulesAction;
use super::presenter::{summarize_rule_set, Presenter};

/// Handle rules subcommand
pub async fn handle_rules_command(
    action: RulesAction,
    config: &AppConfig,
    presenter: &Presenter,
) -> Result<(), RuleSetError> {
    match action {
        RulesAction::Check { path } => {
            let path = resolve_rules_path(path, config);
            handle_check(&path, presenter).await
        }
        RulesAction::Show { path } => {
            let path = resolve_rules_path(path, config);
            let rules = load_rule_set(&path).await?;
            presenter.rule_set(&rules);
            Ok(())
        }
        RulesAction::Export { path, output } => {
            let path = resolve_rules_path(path, config);
            let output = output.or_else(|| config.export_path());
            handle_export(&path, output.as_deref(), presenter).await
        }
    }
}

async fn handle_check(path: &Path, presenter: &Presenter) -> Result<(), RuleSetError> {
    let rules = load_rule_set(path).await?;
    presenter.success(&format!(
        "{}: {}",
        path.display(),
        summarize_rule_set(&rules)
    ));
    Ok(())
}

async fn handle_export(
    path: &Path,
    output: Option<&Path>,
    presenter: &Presenter,
) -> Result<(), RuleSetError> {
    let rules = load_rule_set(path).await?;
    let script = render_finicky(&rules);

    match output {
        Some(out) => {
            fs::write(out, script)
                .await
                .map_err(|e| RuleSetError::WriteError(format!("{}: {}", out.display(), e)))?;
            presenter.info(&format!("Wrote {}", out.display()));
        }
        None => presenter.output(script.trim_end()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const RULES: &str = r#"
defaultBrowser = "Google Chrome"

[[handlers]]
match = ["discord.com*"]
url = { protocol = "discord" }
browser = "Discord"
"#;

    #[tokio::test]
    async fn export_writes_finicky_file() {
        let dir = tempfile::tempdir().unwrap();
        let rules = dir.path().join("home.toml");
        let out = dir.path().join(".finicky.js");
        std::fs::write(&rules, RULES).unwrap();

        let action = RulesAction::Export {
            path: Some(rules),
            output: Some(out.clone()),
        };
        handle_rules_command(action, &AppConfig::empty(), &Presenter::new())
            .await
            .unwrap();

        let script = std::fs::read_to_string(out).unwrap();
        assert!(script.starts_with("module.exports = {"));
        assert!(script.contains("defaultBrowser: \"Google Chrome\""));
        assert!(script.contains("protocol: \"discord\""));
    }

    #[tokio::test]
    async fn check_reports_invalid_rules() {
        let dir = tempfile::tempdir().unwrap();
        let rules = dir.path().join("bad.toml");
        std::fs::write(&rules, "defaultBrowser = \"\"").unwrap();

        let action = RulesAction::Check { path: Some(rules) };
        let err = handle_rules_command(action, &AppConfig::empty(), &Presenter::new())
            .await
            .unwrap_err();
        assert_eq!(err, RuleSetError::EmptyDefaultBrowser);
    }

    #[tokio::test]
    async fn export_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let rules = dir.path().join("home.toml");
        std::fs::write(&rules, RULES).unwrap();

        let action = RulesAction::Export {
            path: Some(rules),
            output: Some(PathBuf::from("/nonexistent/dir/.finicky.js")),
        };
        let err = handle_rules_command(action, &AppConfig::empty(), &Presenter::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RuleSetError::WriteError(_)));
    }
}
