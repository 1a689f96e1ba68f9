//! Tag-keyed rule table for Markdown conversion.

mod rule;
mod standard;

pub use rule::{ReplacementFn, Rule};
pub use standard::standard_rules;

use indexmap::IndexMap;

/// Collection of rules, looked up by tag name.
///
/// Tags without a rule are rendered as transparent containers by the walk.
pub struct Rules {
    rules: Vec<Rule>,
    by_tag: IndexMap<String, usize>,
}

impl Rules {
    /// Create a new Rules instance with the standard rules
    pub fn new() -> Self {
        let mut rules = Self::empty();
        for rule in standard_rules() {
            rules.add(rule);
        }
        rules
    }

    /// Create a table with no rules; every element renders as a container
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            by_tag: IndexMap::new(),
        }
    }

    /// Add a rule. Its tags take precedence over any earlier rule.
    pub fn add(&mut self, rule: Rule) {
        let index = self.rules.len();
        for tag in &rule.tags {
            self.by_tag.insert(tag.clone(), index);
        }
        self.rules.push(rule);
    }

    /// Find the rule for a (lowercased) tag
    pub fn for_tag(&self, tag: &str) -> Option<&Rule> {
        self.by_tag.get(tag).map(|&index| &self.rules[index])
    }

    /// Tags with a registered rule, in registration order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
