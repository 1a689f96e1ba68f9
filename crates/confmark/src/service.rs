//! Converter - the main entry point for Node to Markdown conversion.

use crate::node::{Node, NodeKind};
use crate::options::ConvertOptions;
use crate::parser::MarkupParser;
use crate::postprocess::post_process;
use crate::rules::{Rule, Rules};
use crate::sanitize::{sanitize, Filter};
use crate::walk::Walk;
use crate::{ConvertError, Result};

/// One conversion request: the content root and an optional page title.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionInput<'a> {
    pub root: Option<&'a Node>,
    pub title: Option<&'a str>,
}

impl<'a> ConversionInput<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self {
            root: Some(root),
            title: None,
        }
    }

    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }
}

/// The main service for converting DOM nodes to Markdown
pub struct Converter {
    options: ConvertOptions,
    rules: Rules,
}

impl Converter {
    /// Create a new Converter with default options
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }

    /// Create a Converter with custom options
    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Convert a DOM Node tree to Markdown
    pub fn convert(&self, root: &Node) -> Result<String> {
        self.convert_input(ConversionInput::new(root))
    }

    /// Convert a full request.
    ///
    /// Any failure aborts the conversion; no partial Markdown is returned.
    pub fn convert_input(&self, input: ConversionInput<'_>) -> Result<String> {
        let root = input.root.ok_or(ConvertError::EmptyInput)?;
        if let NodeKind::Ignored = root.classify() {
            return Err(ConvertError::EmptyInput);
        }

        let sanitized;
        let root = if self.options.sanitize {
            sanitized = sanitize(root, &self.options.remove, self.options.max_depth)?;
            tracing::debug!(removed = sanitized.removed, "sanitized boilerplate");
            &sanitized.root
        } else {
            root
        };

        let body = Walk::new(&self.rules, &self.options).render(root)?;

        let title = input.title.or(self.options.title.as_deref());
        let markdown = post_process(&prepend_title(body, title));

        tracing::debug!(bytes = markdown.len(), "converted document");
        Ok(markdown)
    }

    /// Parse markup with the bundled HTML parser, then convert it
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> Result<String> {
        let parser = crate::html::ScraperParser::with_max_depth(self.options.max_depth);
        self.convert_with(&parser, html)
    }

    /// Parse markup with `parser`, then convert it
    pub fn convert_with<P>(&self, parser: &P, markup: &str) -> Result<String>
    where
        P: MarkupParser + ?Sized,
    {
        if markup.trim().is_empty() {
            return Err(ConvertError::EmptyInput);
        }
        let root = parser.parse(markup)?;
        self.convert(&root)
    }

    /// Add a rule; its tags replace any existing rule for them
    pub fn add_rule(&mut self, rule: Rule) -> &mut Self {
        self.rules.add(rule);
        self
    }

    /// Remove elements matching the filter during the sanitizing pre-pass
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.options.remove.push(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ConvertOptions {
        &mut self.options
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Lead with `# title` unless the body already opens with that heading
fn prepend_title(body: String, title: Option<&str>) -> String {
    let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) else {
        return body;
    };

    let heading = format!("# {}", title);
    let first_line = body.trim_start().lines().next().map(str::trim_end);
    if first_line == Some(heading.as_str()) {
        return body;
    }

    format!("\n{}\n\n{}", heading, body)
}
