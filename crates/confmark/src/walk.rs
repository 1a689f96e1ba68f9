//! Recursive dispatch from DOM nodes to Markdown fragments.

use crate::node::{Element, Node, NodeKind};
use crate::options::ConvertOptions;
use crate::rules::Rules;
use crate::utilities::is_list;
use crate::{ConvertError, Result};

/// State threaded through one rendering walk.
///
/// A `Walk` is cheap to copy; every descent produces a new value instead of
/// mutating shared state, so rules never see context from sibling subtrees.
#[derive(Clone, Copy)]
pub struct Walk<'a> {
    rules: &'a Rules,
    options: &'a ConvertOptions,
    depth: usize,
    in_pre: bool,
    skip_lists: bool,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(rules: &'a Rules, options: &'a ConvertOptions) -> Self {
        Self {
            rules,
            options,
            depth: 0,
            in_pre: false,
            skip_lists: false,
        }
    }

    pub fn options(&self) -> &'a ConvertOptions {
        self.options
    }

    /// Whether the element being rendered is a direct child of `<pre>`
    pub fn in_pre(&self) -> bool {
        self.in_pre
    }

    /// Render any node.
    ///
    /// Text is returned verbatim, comments render to nothing and elements go
    /// through the rule registered for their tag, falling back to rendering
    /// their children.
    pub fn render(&self, node: &Node) -> Result<String> {
        match node.classify() {
            NodeKind::Text(content) => Ok(content.to_string()),
            NodeKind::Element(element) => self.render_element(element),
            NodeKind::Ignored => Ok(String::new()),
        }
    }

    pub fn render_element(&self, element: &Element) -> Result<String> {
        if self.skip_lists && is_list(element) {
            return Ok(String::new());
        }

        let walk = self.descend()?;
        match self.rules.for_tag(&element.tag) {
            Some(rule) => {
                tracing::trace!(tag = %element.tag, depth = walk.depth, "applying rule");
                rule.replace(element, &walk)
            }
            None => walk.render_children(element),
        }
    }

    /// Concatenate the rendering of every child, in document order
    pub fn render_children(&self, element: &Element) -> Result<String> {
        let walk = Walk {
            in_pre: element.is("pre"),
            ..*self
        };

        let mut result = String::new();
        for child in &element.children {
            result.push_str(&walk.render(child)?);
        }
        Ok(result)
    }

    /// One level deeper, failing once the configured depth is exceeded
    pub fn descend(&self) -> Result<Walk<'a>> {
        let depth = self.depth + 1;
        if depth > self.options.max_depth {
            tracing::warn!(limit = self.options.max_depth, "recursion limit exceeded");
            return Err(ConvertError::RecursionLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        Ok(Walk { depth, ..*self })
    }

    /// A walk that renders nested `ul`/`ol` elements as nothing.
    ///
    /// Used for list item text; the list renderer emits the nested lists
    /// itself, indented one level deeper.
    pub fn without_lists(&self) -> Walk<'a> {
        Walk {
            skip_lists: true,
            ..*self
        }
    }

    /// A walk that renders nested lists again, used when the list renderer
    /// descends into a sublist.
    pub(crate) fn with_lists(&self) -> Walk<'a> {
        Walk {
            skip_lists: false,
            ..*self
        }
    }
}
