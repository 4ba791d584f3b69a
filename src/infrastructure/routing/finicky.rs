//! finicky configuration exporter
//!
//! Renders a rule set as the `module.exports` JavaScript document read by
//! the finicky browser dispatcher.

use std::fmt;

use crate::domain::routing::{Browser, Handler, Matcher, RuleSet};

/// Display adapter producing finicky JavaScript
pub struct FinickyExport<'a>(pub &'a RuleSet);

/// Render a rule set as a finicky config file
pub fn render_finicky(rules: &RuleSet) -> String {
    FinickyExport(rules).to_string()
}

impl fmt::Display for FinickyExport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "module.exports = {{")?;
        writeln!(f, "  defaultBrowser: {},", js_string(&self.0.default_browser))?;
        writeln!(f, "  handlers: [")?;
        for handler in &self.0.handlers {
            write_handler(f, handler)?;
        }
        writeln!(f, "  ],")?;
        writeln!(f, "}};")
    }
}

fn write_handler(f: &mut fmt::Formatter<'_>, handler: &Handler) -> fmt::Result {
    writeln!(f, "    {{")?;

    match handler.matchers.as_slice() {
        [Matcher::Hostnames(m)] => {
            writeln!(f, "      match: finicky.matchHostnames([")?;
            let last = m.hostnames.len().saturating_sub(1);
            for (i, host) in m.hostnames.iter().enumerate() {
                let sep = if i == last { "" } else { "," };
                writeln!(f, "        {}{}", js_string(host), sep)?;
            }
            writeln!(f, "      ]),")?;
        }
        matchers => {
            let items: Vec<String> = matchers.iter().map(inline_matcher).collect();
            writeln!(f, "      match: [{}],", items.join(", "))?;
        }
    }

    if let Some(protocol) = handler.url.as_ref().and_then(|u| u.protocol.as_ref()) {
        writeln!(f, "      url: {{")?;
        writeln!(f, "        protocol: {},", js_string(protocol))?;
        writeln!(f, "      }},")?;
    }

    match &handler.browser {
        Browser::Name(name) => writeln!(f, "      browser: {},", js_string(name))?,
        Browser::Target(target) => {
            writeln!(f, "      browser: {{")?;
            writeln!(f, "        name: {},", js_string(&target.name))?;
            if let Some(profile) = &target.profile {
                writeln!(f, "        profile: {},", js_string(profile))?;
            }
            writeln!(f, "      }},")?;
        }
    }

    writeln!(f, "    }},")
}

fn inline_matcher(matcher: &Matcher) -> String {
    match matcher {
        Matcher::Pattern(pattern) => js_string(pattern),
        Matcher::Hostnames(m) => {
            let hosts: Vec<String> = m.hostnames.iter().map(|h| js_string(h)).collect();
            format!("finicky.matchHostnames([{}])", hosts.join(", "))
        }
    }
}

/// JSON string literals are valid JavaScript string literals
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}
