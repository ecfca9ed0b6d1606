use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

pub(crate) const STOCK: &str = include_str!("../../prompts/stock.md");
pub(crate) const DEALS_LOTTO: &str = include_str!("../../prompts/deals_lotto.md");
pub(crate) const DEALS_STOCK: &str = include_str!("../../prompts/deals_stock.md");
pub(crate) const DEALS_GENERAL: &str = include_str!("../../prompts/deals_general.md");
pub(crate) const RECOMMEND: &str = include_str!("../../prompts/recommend.md");

lazy_static! {
    // Matches {{variable}} with optional spaces.
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("invalid placeholder regex");
}

/// Replaces every `{{ name }}` in the template. Unknown names become empty.
pub(crate) fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let replacements: HashMap<&str, &str> = vars.iter().copied().collect();

    let filled = PLACEHOLDER.replace_all(template, |caps: &regex::Captures| {
        replacements.get(&caps[1]).copied().unwrap_or("").to_string()
    });

    filled.trim().to_string()
}
