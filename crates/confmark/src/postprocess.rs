//! Textual normalization of the assembled document.
//!
//! This pass never parses Markdown; it only rewrites whitespace patterns.

use once_cell::sync::Lazy;
use regex::Regex;

static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("newline regex is valid"));

static TOP_LEVEL_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s.").expect("list item regex is valid"));

/// Normalize rendered Markdown.
///
/// In order: runs of three or more newlines become exactly two, the
/// document is trimmed, and a single blank line between two top-level list
/// item lines is removed. The result is stable: applying this again returns
/// the same string.
pub fn post_process(markdown: &str) -> String {
    let collapsed = EXCESS_NEWLINES.replace_all(markdown, "\n\n");
    tighten_list_items(collapsed.trim())
}

fn tighten_list_items(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut kept = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let between_items = line.is_empty()
            && i > 0
            && i + 1 < lines.len()
            && is_top_level_item(lines[i - 1])
            && is_top_level_item(lines[i + 1]);
        if !between_items {
            kept.push(*line);
        }
    }

    kept.join("\n")
}

fn is_top_level_item(line: &str) -> bool {
    TOP_LEVEL_ITEM.is_match(line)
}
