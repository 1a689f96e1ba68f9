//! Fenced code block language detection.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::Element;
use crate::utilities::non_empty;

static LANGUAGE_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"language-(\w+)").expect("language class regex is valid"));

/// Infer the language tag for a `pre` element.
///
/// The `pre`'s own `class` is used when present, otherwise the class of its
/// first descendant `code`; a `language-{name}` token there wins. Failing
/// that, a `data-language` attribute on the same two elements is used.
/// Returns an empty string when nothing matches.
pub fn detect_language(pre: &Element) -> String {
    let code = pre.find_descendant(|e| e.is("code"));

    let class = non_empty(pre.attr("class"))
        .or_else(|| code.and_then(|c| non_empty(c.attr("class"))))
        .unwrap_or("");
    if let Some(captures) = LANGUAGE_CLASS.captures(class) {
        return captures[1].to_string();
    }

    non_empty(pre.attr("data-language"))
        .or_else(|| code.and_then(|c| non_empty(c.attr("data-language"))))
        .unwrap_or("")
        .to_string()
}
