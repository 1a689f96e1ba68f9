//! DOM node structure consumed by the converter.
//!
//! Any parser (html5ever, a browser bridge, a hand-built tree in tests) can
//! produce this structure. The converter only ever borrows it.

use indexmap::IndexMap;

/// A DOM node: an element, a run of text, or a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Comments carry no content and never produce output.
    Comment(String),
}

/// An element node with lowercased tag and attribute names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

/// Result of classifying a node for rendering.
#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
    Text(&'a str),
    Element(&'a Element),
    /// Comments and other non-content nodes
    Ignored,
}

/// Tag used for synthetic fragment roots.
pub const FRAGMENT_TAG: &str = "#document-fragment";

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Node::Element(Element::new(tag_name))
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut element = Element::new(tag_name);
        for (name, value) in attrs {
            element.set_attr(name, value);
        }
        Node::Element(element)
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Node::Comment(content.to_string())
    }

    /// Create a document fragment node
    pub fn fragment() -> Self {
        Node::element(FRAGMENT_TAG)
    }

    /// Builder form of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Builder that appends a text child
    pub fn with_text(self, content: &str) -> Self {
        self.with_child(Node::text(content))
    }

    /// Determine what kind of node this is for rendering.
    pub fn classify(&self) -> NodeKind<'_> {
        match self {
            Node::Text(content) => NodeKind::Text(content),
            Node::Element(element) => NodeKind::Element(element),
            Node::Comment(_) => NodeKind::Ignored,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Tag name for elements, `None` for text and comments
    pub fn tag_name(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag.as_str())
    }

    /// Get an attribute value by name (elements only)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element()?.attr(name)
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.as_element().into_iter().flat_map(|e| e.children.iter())
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children().filter_map(Node::as_element)
    }

    /// Add a child node. Text and comment nodes cannot have children, so the
    /// call is a no-op for them.
    pub fn add_child(&mut self, child: Node) {
        if let Node::Element(element) = self {
            element.children.push(child);
        }
    }

    /// Set an attribute (elements only)
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Node::Element(element) = self {
            element.set_attr(name, value);
        }
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(content) => content.clone(),
            Node::Element(element) => element.text_content(),
            Node::Comment(_) => String::new(),
        }
    }
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag: tag_name.to_lowercase(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(value) => Some(value.as_str()),
            None => self.attributes.get(&name.to_lowercase()).map(String::as_str),
        }
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_lowercase(), value.to_string());
    }

    /// Check whether the whitespace-separated `class` attribute holds `token`
    pub fn has_class(&self, token: &str) -> bool {
        self.attr("class")
            .is_some_and(|class| class.split_whitespace().any(|c| c == token))
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First descendant element (pre-order, excluding `self`) matching `pred`
    pub fn find_descendant<F>(&self, pred: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if let Node::Element(element) = node {
                if pred(element) {
                    return Some(element);
                }
                stack.extend(element.children.iter().rev());
            }
        }
        None
    }

    /// Concatenated text of all descendant text nodes, in document order.
    ///
    /// Walks with an explicit stack so that pathological nesting cannot
    /// overflow the call stack.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Text(content) => text.push_str(content),
                Node::Element(element) => stack.extend(element.children.iter().rev()),
                Node::Comment(_) => {}
            }
        }
        text
    }

    /// Trimmed text content, the `T` of the rendering rules
    pub fn trimmed_text(&self) -> String {
        self.text_content().trim().to_string()
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
