//! Sanitizing pre-pass that strips non-content subtrees.
//!
//! The pass builds a filtered copy of the tree; the caller's tree is never
//! touched. Removal is structural: a matching element goes away together
//! with everything below it, so the renderer never visits it.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::{Element, Node};
use crate::{ConvertError, Result};

/// Selectors removed by default
pub const DEFAULT_DENYLIST: &[&str] = &[
    "script",
    "style",
    "noscript",
    "template",
    "nav",
    ".page-metadata",
    ".page-comments",
    ".footer",
    ".header",
    ".navigation",
    ".sidebar",
    "[class*=\"advert\"]",
    "[class*=\"metadata\"]",
    "[data-testid*=\"metadata\"]",
    "[role=\"navigation\"]",
];

static TAG_SELECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("tag selector regex is valid"));

static CLASS_SELECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\.(-?[A-Za-z_][A-Za-z0-9_-]*)$").expect("class selector regex is valid")
});

static ATTRIBUTE_SELECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\[\s*([A-Za-z_:][A-Za-z0-9_:.-]*)\s*(?:(\*?=)\s*(?:"([^"]*)"|'([^']*)'|([^\]\s"']+))\s*)?\]$"#,
    )
    .expect("attribute selector regex is valid")
});

/// How an attribute filter compares the attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    /// `[name]`
    Exists,
    /// `[name="value"]`
    Equals(String),
    /// `[name*="value"]`
    Contains(String),
}

/// A removal rule for the sanitizing pre-pass
#[derive(Clone)]
pub enum Filter {
    /// Match a tag name
    Tag(String),
    /// Match one token of the `class` attribute
    Class(String),
    /// Match an attribute
    Attribute { name: String, op: AttrOp },
    /// Match using a predicate function
    Predicate(Arc<dyn Fn(&Element) -> bool + Send + Sync>),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(name: &str) -> Self {
        Filter::Tag(name.to_lowercase())
    }

    /// Create a filter for a class token
    pub fn class(token: &str) -> Self {
        Filter::Class(token.to_string())
    }

    /// Create a filter for an attribute
    pub fn attribute(name: &str, op: AttrOp) -> Self {
        Filter::Attribute {
            name: name.to_lowercase(),
            op,
        }
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Element) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Arc::new(f))
    }

    /// Parse a simple CSS selector: `tag`, `.class`, `[attr]`,
    /// `[attr="value"]` or `[attr*="value"]`.
    pub fn parse(selector: &str) -> Result<Self> {
        let selector = selector.trim();

        if TAG_SELECTOR.is_match(selector) {
            return Ok(Filter::tag(selector));
        }

        if let Some(captures) = CLASS_SELECTOR.captures(selector) {
            return Ok(Filter::class(&captures[1]));
        }

        if let Some(captures) = ATTRIBUTE_SELECTOR.captures(selector) {
            let name = &captures[1];
            let value = captures
                .get(3)
                .or_else(|| captures.get(4))
                .or_else(|| captures.get(5))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            let op = match captures.get(2).map(|m| m.as_str()) {
                None => AttrOp::Exists,
                Some("=") => AttrOp::Equals(value),
                Some(_) => AttrOp::Contains(value),
            };
            return Ok(Filter::attribute(name, op));
        }

        Err(ConvertError::InvalidSelector(selector.to_string()))
    }

    /// Check if this filter matches an element
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Filter::Tag(tag) => element.tag == *tag,
            Filter::Class(token) => element.has_class(token),
            Filter::Attribute { name, op } => match (element.attr(name), op) {
                (None, _) => false,
                (Some(_), AttrOp::Exists) => true,
                (Some(value), AttrOp::Equals(expected)) => value == expected,
                (Some(value), AttrOp::Contains(needle)) => {
                    !needle.is_empty() && value.contains(needle.as_str())
                }
            },
            Filter::Predicate(f) => f(element),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Filter::Class(token) => f.debug_tuple("Class").field(token).finish(),
            Filter::Attribute { name, op } => f
                .debug_struct("Attribute")
                .field("name", name)
                .field("op", op)
                .finish(),
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// The default boilerplate denylist as filters
pub fn default_denylist() -> Vec<Filter> {
    DEFAULT_DENYLIST
        .iter()
        .map(|selector| Filter::parse(selector).expect("default selectors are valid"))
        .collect()
}

/// A filtered copy of a tree
#[derive(Debug, Clone)]
pub struct Sanitized {
    pub root: Node,
    /// Number of subtrees removed
    pub removed: usize,
}

/// Copy `root`, leaving out every descendant element that matches a filter.
///
/// A root that matches a filter is replaced by an empty fragment. Fails with
/// [`ConvertError::RecursionLimitExceeded`] when elements nest deeper than
/// `max_depth`.
pub fn sanitize(root: &Node, filters: &[Filter], max_depth: usize) -> Result<Sanitized> {
    let mut sanitizer = Sanitizer {
        filters,
        max_depth,
        removed: 0,
    };

    let root = match root {
        Node::Element(element) if sanitizer.is_boilerplate(element) => {
            tracing::trace!(tag = %element.tag, "removing boilerplate root");
            sanitizer.removed += 1;
            Node::fragment()
        }
        Node::Element(element) => Node::from(sanitizer.copy(element, 1)?),
        other => other.clone(),
    };

    Ok(Sanitized {
        root,
        removed: sanitizer.removed,
    })
}

struct Sanitizer<'a> {
    filters: &'a [Filter],
    max_depth: usize,
    removed: usize,
}

impl Sanitizer<'_> {
    fn copy(&mut self, element: &Element, depth: usize) -> Result<Element> {
        if depth > self.max_depth {
            tracing::warn!(limit = self.max_depth, "recursion limit exceeded while sanitizing");
            return Err(ConvertError::RecursionLimitExceeded {
                limit: self.max_depth,
            });
        }

        let mut children = Vec::with_capacity(element.children.len());
        for child in &element.children {
            match child {
                Node::Element(child) if self.is_boilerplate(child) => {
                    tracing::trace!(tag = %child.tag, "removing boilerplate subtree");
                    self.removed += 1;
                }
                Node::Element(child) => children.push(self.copy(child, depth + 1)?.into()),
                other => children.push(other.clone()),
            }
        }

        Ok(Element {
            tag: element.tag.clone(),
            attributes: element.attributes.clone(),
            children,
        })
    }

    fn is_boilerplate(&self, element: &Element) -> bool {
        self.filters.iter().any(|filter| filter.matches(element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_MAX_DEPTH;

    fn run(root: &Node) -> Sanitized {
        sanitize(root, &default_denylist(), DEFAULT_MAX_DEPTH).unwrap()
    }

    #[test]
    fn test_parse_tag() {
        assert!(matches!(Filter::parse("SCRIPT").unwrap(), Filter::Tag(t) if t == "script"));
    }

    #[test]
    fn test_parse_class() {
        assert!(matches!(Filter::parse(".page-comments").unwrap(), Filter::Class(c) if c == "page-comments"));
    }

    #[test]
    fn test_parse_attributes() {
        match Filter::parse(r#"[data-testid="page-metadata"]"#).unwrap() {
            Filter::Attribute { name, op } => {
                assert_eq!(name, "data-testid");
                assert_eq!(op, AttrOp::Equals("page-metadata".to_string()));
            }
            other => panic!("unexpected {other:?}"),
        }
        match Filter::parse("[class*=advert]").unwrap() {
            Filter::Attribute { op, .. } => assert_eq!(op, AttrOp::Contains("advert".to_string())),
            other => panic!("unexpected {other:?}"),
        }
        match Filter::parse("[hidden]").unwrap() {
            Filter::Attribute { op, .. } => assert_eq!(op, AttrOp::Exists),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_complex_selectors() {
        for selector in ["div > p", "#main", "a:hover", "", "[unclosed"] {
            assert!(
                matches!(Filter::parse(selector), Err(ConvertError::InvalidSelector(_))),
                "{selector} should be rejected"
            );
        }
    }

    #[test]
    fn test_matches() {
        let node = Node::element_with_attrs(
            "div",
            vec![("class", "ad-slot footer"), ("data-kind", "sponsored-box")],
        );
        let element = node.as_element().unwrap();
        assert!(Filter::parse(".footer").unwrap().matches(element));
        assert!(!Filter::parse(".foot").unwrap().matches(element));
        assert!(Filter::parse("[data-kind*=sponsored]").unwrap().matches(element));
        assert!(!Filter::parse("[data-kind=sponsored]").unwrap().matches(element));
        assert!(Filter::predicate(|e| e.attributes.len() == 2).matches(element));
    }

    #[test]
    fn test_removes_scripts_anywhere() {
        let root = Node::element("div")
            .with_child(Node::element("script").with_text("alert(1)"))
            .with_child(
                Node::element("p")
                    .with_text("keep")
                    .with_child(Node::element("span").with_child(Node::element("script").with_text("x"))),
            );
        let sanitized = run(&root);
        assert_eq!(sanitized.removed, 2);
        assert_eq!(sanitized.root.text_content(), "keep");
    }

    #[test]
    fn test_removes_boilerplate_regions() {
        let root = Node::element("div")
            .with_child(Node::element_with_attrs("div", vec![("class", "page-metadata")]).with_text("meta"))
            .with_child(
                Node::element_with_attrs("div", vec![("data-testid", "page-metadata")]).with_text("meta2"),
            )
            .with_child(Node::element("nav").with_text("menu"))
            .with_child(Node::element_with_attrs("ul", vec![("role", "navigation")]).with_text("links"))
            .with_child(Node::element("p").with_text("body"));
        let sanitized = run(&root);
        assert_eq!(sanitized.removed, 4);
        assert_eq!(sanitized.root.text_content(), "body");
    }

    #[test]
    fn test_original_is_untouched() {
        let root = Node::element("div")
            .with_child(Node::element("style").with_text("p {}"))
            .with_text("text");
        let before = root.clone();
        let sanitized = run(&root);
        assert_eq!(root, before);
        assert_ne!(sanitized.root, root);
    }

    #[test]
    fn test_matching_root_becomes_empty_fragment() {
        let sanitized = run(&Node::element("script").with_text("x"));
        assert_eq!(sanitized.root, Node::fragment());
        assert_eq!(sanitized.removed, 1);

        let sanitized = run(&Node::element("nav").with_child(Node::element("p").with_text("menu")));
        assert_eq!(sanitized.root.text_content(), "");
    }

    #[test]
    fn test_other_roots_are_kept() {
        let root = Node::element("article").with_text("body");
        assert_eq!(run(&root).root, root);
        assert_eq!(run(&Node::text("t")).root, Node::text("t"));
    }

    #[test]
    fn test_default_denylist_matches_class_substrings() {
        let root = Node::element("div")
            .with_child(Node::element_with_attrs("aside", vec![("class", "sponsored advert-box")]).with_text("buy"))
            .with_child(Node::element_with_attrs("div", vec![("class", "confluence-metadata-panel")]).with_text("meta"))
            .with_child(Node::element_with_attrs("div", vec![("data-testid", "page-metadata-banner")]).with_text("meta2"))
            .with_child(Node::element_with_attrs("p", vec![("class", "adventure")]).with_text("body"));
        let sanitized = run(&root);
        assert_eq!(sanitized.removed, 3);
        assert_eq!(sanitized.root.text_content(), "body");
    }

    #[test]
    fn test_depth_limit() {
        let mut root = Node::element("div");
        for _ in 0..10 {
            root = Node::element("div").with_child(root);
        }
        let err = sanitize(&root, &[], 5).unwrap_err();
        assert!(matches!(err, ConvertError::RecursionLimitExceeded { limit: 5 }));
    }
}
