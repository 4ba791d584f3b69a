//! Shipped rule set tests

use std::path::{Path, PathBuf};

use deskkit::domain::routing::{Browser, Matcher};
use deskkit::infrastructure::routing::{load_rule_set, render_finicky};

fn shipped(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("rules").join(name)
}

#[tokio::test]
async fn work_rules_are_valid() {
    let rules = load_rule_set(&shipped("work.toml")).await.unwrap();

    assert_eq!(rules.default_browser, "Arc");
    assert_eq!(rules.handlers.len(), 2);
    assert_eq!(rules.handlers[0].browser, Browser::Name("Discord".into()));
    assert!(matches!(
        &rules.handlers[1].matchers[..],
        [Matcher::Hostnames(m)] if m.hostnames.contains(&"forms.gle".to_string())
    ));
    assert_eq!(rules.handlers[1].browser.profile(), Some("Profile 1"));
}

#[tokio::test]
async fn home_rules_are_valid() {
    let rules = load_rule_set(&shipped("home.toml")).await.unwrap();

    assert_eq!(rules.default_browser, "Google Chrome");
    assert_eq!(rules.handlers.len(), 1);
}

#[tokio::test]
async fn work_rules_export_matches_finicky_config() {
    let rules = load_rule_set(&shipped("work.toml")).await.unwrap();

    let expected = r#"module.exports = {
  defaultBrowser: "Arc",
  handlers: [
    {
      match: ["discord.com*"],
      url: {
        protocol: "discord",
      },
      browser: "Discord",
    },
    {
      match: finicky.matchHostnames([
        "drive.google.com",
        "docs.google.com",
        "forms.gle"
      ]),
      browser: {
        name: "Google Chrome",
        profile: "Profile 1",
      },
    },
  ],
};
"#;
    assert_eq!(render_finicky(&rules), expected);
}
