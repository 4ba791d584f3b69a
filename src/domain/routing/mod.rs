//! Browser routing rule sets
//!
//! Declarative data for an external dispatch host. Only the schema and its
//! load-time validation live here; matching is the host's job.

mod rule_set;

pub use rule_set::{Browser, BrowserTarget, Handler, HostnameMatcher, Matcher, RuleSet, UrlRewrite};
