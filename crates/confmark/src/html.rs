//! HTML parsing support.
//!
//! This module parses HTML strings with `scraper` (html5ever) and converts
//! them to the [`Node`] structure used by the converter.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;
use crate::options::DEFAULT_MAX_DEPTH;
use crate::parser::MarkupParser;
use crate::{ConvertError, Result};

/// [`MarkupParser`] backed by html5ever.
///
/// Markup is parsed as a body fragment; the returned root is the `html`
/// element html5ever wraps fragments in, which renders as a plain container.
#[derive(Debug, Clone, Copy)]
pub struct ScraperParser {
    max_depth: usize,
}

impl ScraperParser {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for ScraperParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser for ScraperParser {
    fn parse(&self, markup: &str) -> Result<Node> {
        let document = Html::parse_fragment(markup);
        if !document.errors.is_empty() {
            tracing::debug!(errors = document.errors.len(), "html5ever recovered from markup errors");
        }
        scraper_to_node(document.root_element(), 1, self.max_depth)
    }
}

/// Parse an HTML string into a Node tree.
///
/// # Example
///
/// ```rust
/// use confmark::{parse_html, Converter};
///
/// let node = parse_html("<h1>Hello <em>World</em></h1>").unwrap();
///
/// let converter = Converter::new();
/// let markdown = converter.convert(&node).unwrap();
/// assert_eq!(markdown, "# Hello World");
/// ```
pub fn parse_html(html: &str) -> Result<Node> {
    ScraperParser::new().parse(html)
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef, depth: usize, max_depth: usize) -> Result<Node> {
    if depth > max_depth {
        return Err(ConvertError::RecursionLimitExceeded { limit: max_depth });
    }

    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(element.value().name(), attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element, depth + 1, max_depth)?);
                }
            }
            _ => {}
        }
    }

    Ok(node)
}
