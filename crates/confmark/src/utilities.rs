//! Small helpers shared by the renderers.

use crate::node::Element;

/// Tags that open a list
pub const LIST_ELEMENTS: &[&str] = &["ul", "ol"];

/// Tags rendered as transparent containers by name
pub const CONTAINER_ELEMENTS: &[&str] = &["div", "section", "article", "span", "label"];

/// Check if an element is a `ul` or `ol`
pub fn is_list(element: &Element) -> bool {
    LIST_ELEMENTS.contains(&element.tag.as_str())
}

/// Indentation for a list nesting level (two spaces per level)
pub fn indent(level: usize) -> String {
    "  ".repeat(level)
}

/// Prefix every line with `> `; blank lines become a bare `>`
pub fn quote_lines(content: &str) -> String {
    content
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Attribute value, treating empty strings as absent
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "    ");
    }

    #[test]
    fn test_quote_lines() {
        assert_eq!(quote_lines("a\n\nb"), "> a\n>\n> b");
        assert_eq!(quote_lines("a\n   \nb"), "> a\n>\n> b");
        assert_eq!(quote_lines("> nested"), "> > nested");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("x")), Some("x"));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
    }
}
