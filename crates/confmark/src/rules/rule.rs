//! Rule type mapping tags to Markdown replacements.

use crate::node::Element;
use crate::walk::Walk;
use crate::Result;

/// Type alias for replacement functions
pub type ReplacementFn = Box<dyn Fn(&Element, &Walk<'_>) -> Result<String> + Send + Sync>;

/// A rule defines how to convert an element with one of its tags to Markdown
pub struct Rule {
    /// Lowercased tag names this rule handles
    pub tags: Vec<String>,
    /// Replacement function that generates Markdown
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a rule that matches multiple tags
    pub fn for_tags<F>(tags: &[&str], replacement: F) -> Self
    where
        F: Fn(&Element, &Walk<'_>) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            tags: tags.iter().map(|t| t.to_lowercase()).collect(),
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&Element, &Walk<'_>) -> Result<String> + Send + Sync + 'static,
    {
        Self::for_tags(&[tag], replacement)
    }

    /// Apply this rule's replacement
    pub fn replace(&self, element: &Element, walk: &Walk<'_>) -> Result<String> {
        (self.replacement)(element, walk)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("tags", &self.tags).finish_non_exhaustive()
    }
}
