//! CLI presenter for output formatting

use colored::*;

use crate::domain::routing::RuleSet;

/// Presenter for CLI output formatting.
///
/// Status messages go to stderr, results to stdout.
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print a rule set, one handler per block
    pub fn rule_set(&self, rules: &RuleSet) {
        for line in format_rule_set(rules) {
            println!("{}", line);
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line summary of a rule set
pub fn summarize_rule_set(rules: &RuleSet) -> String {
    let count = rules.handlers.len();
    format!(
        "{} handler{}, default browser \"{}\"",
        count,
        if count == 1 { "" } else { "s" },
        rules.default_browser
    )
}

/// Plain-text listing of a rule set
pub fn format_rule_set(rules: &RuleSet) -> Vec<String> {
    let mut lines = vec![format!("default: {}", rules.default_browser)];

    for (i, handler) in rules.handlers.iter().enumerate() {
        let matchers: Vec<String> = handler.matchers.iter().map(|m| m.to_string()).collect();
        lines.push(format!("#{} {}", i + 1, matchers.join(" | ")));
        if let Some(protocol) = handler.url.as_ref().and_then(|u| u.protocol.as_deref()) {
            lines.push(format!("   protocol -> {}", protocol));
        }
        lines.push(format!("   browser  -> {}", handler.browser));
    }

    lines
}
