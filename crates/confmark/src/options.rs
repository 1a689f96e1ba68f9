//! Configuration options for a conversion

use crate::sanitize::{default_denylist, Filter};

/// Default bound on element nesting before a conversion fails closed.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Which nested lists of a list item are rendered below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestedLists {
    /// Only the first nested list (in document order) is rendered; any
    /// further sibling sublists of the same item are dropped.
    #[default]
    FirstOnly,
    /// Every nested list of the item is rendered, in document order.
    All,
}

/// Options for [`Converter`](crate::Converter)
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Page title emitted as a leading H1, unless the body already opens
    /// with the same heading
    pub title: Option<String>,

    /// Maximum element nesting depth
    pub max_depth: usize,

    /// Nested list policy
    pub nested_lists: NestedLists,

    /// Run the sanitizing pre-pass
    pub sanitize: bool,

    /// Removal filters applied by the sanitizing pre-pass
    pub remove: Vec<Filter>,
}

impl ConvertOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_nested_lists(mut self, nested_lists: NestedLists) -> Self {
        self.nested_lists = nested_lists;
        self
    }

    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    /// Append a removal filter to the current denylist
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.remove.push(filter);
        self
    }

    /// Replace the whole denylist
    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.remove = filters;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            title: None,
            max_depth: DEFAULT_MAX_DEPTH,
            nested_lists: NestedLists::FirstOnly,
            sanitize: true,
            remove: default_denylist(),
        }
    }
}
