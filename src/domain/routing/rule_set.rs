//! Rule set schema and validation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::RuleSetError;

/// An ordered list of handlers plus the browser used when none match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    #[serde(rename = "defaultBrowser", alias = "default_browser")]
    pub default_browser: String,
    #[serde(default)]
    pub handlers: Vec<Handler>,
}

/// One routing rule. The host evaluates handlers top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Handler {
    #[serde(rename = "match")]
    pub matchers: Vec<Matcher>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<UrlRewrite>,
    pub browser: Browser,
}

/// A glob pattern or a list of exact hostnames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Matcher {
    Pattern(String),
    Hostnames(HostnameMatcher),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostnameMatcher {
    pub hostnames: Vec<String>,
}

/// Rewrite applied to the URL before it is handed to the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UrlRewrite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Target browser: a bare application name or a name with a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Browser {
    Name(String),
    Target(BrowserTarget),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrowserTarget {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Browser {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Target(target) => &target.name,
        }
    }

    pub fn profile(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Target(target) => target.profile.as_deref(),
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.profile() {
            Some(profile) => write!(f, "{} ({})", self.name(), profile),
            None => f.write_str(self.name()),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(pattern) => f.write_str(pattern),
            Self::Hostnames(m) => write!(f, "hostnames({})", m.hostnames.join(", ")),
        }
    }
}

impl RuleSet {
    /// Check the rule set for entries the dispatch host would reject.
    /// Reports the first problem found.
    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.default_browser.trim().is_empty() {
            return Err(RuleSetError::EmptyDefaultBrowser);
        }

        for (i, handler) in self.handlers.iter().enumerate() {
            handler.validate(i + 1)?;
        }

        Ok(())
    }
}

impl Handler {
    fn validate(&self, index: usize) -> Result<(), RuleSetError> {
        if self.matchers.is_empty() {
            return Err(RuleSetError::EmptyMatch { index });
        }

        for matcher in &self.matchers {
            match matcher {
                Matcher::Pattern(pattern) => {
                    if pattern.trim().is_empty() {
                        return Err(RuleSetError::EmptyPattern { index });
                    }
                }
                Matcher::Hostnames(m) => {
                    if m.hostnames.is_empty() {
                        return Err(RuleSetError::EmptyHostnames { index });
                    }
                    if let Some(bad) = m.hostnames.iter().find(|h| !is_valid_hostname(h)) {
                        return Err(RuleSetError::InvalidHostname {
                            index,
                            hostname: bad.clone(),
                        });
                    }
                }
            }
        }

        if let Some(protocol) = self.url.as_ref().and_then(|u| u.protocol.as_ref()) {
            if !is_valid_scheme(protocol) {
                return Err(RuleSetError::InvalidProtocol {
                    index,
                    protocol: protocol.clone(),
                });
            }
        }

        if self.browser.name().trim().is_empty() {
            return Err(RuleSetError::EmptyBrowserName { index });
        }
        if let Some(profile) = self.browser.profile() {
            if profile.trim().is_empty() {
                return Err(RuleSetError::EmptyProfile { index });
            }
        }

        Ok(())
    }
}

fn is_valid_hostname(host: &str) -> bool {
    !host.is_empty()
        && !host
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == ':')
}

/// URL scheme syntax: a letter followed by letters, digits, '+', '-' or '.'
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
