//! Rule set file formats: loading from TOML/JSON, exporting to finicky

mod finicky;
mod loader;

pub use finicky::{render_finicky, FinickyExport};
pub use loader::{load_rule_set, parse_rule_set, RuleSetFormat};
