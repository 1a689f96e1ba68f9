//! # confmark
//!
//! Convert the content region of a wiki or documentation page to Markdown.
//!
//! ## Design
//!
//! The converter accepts a ready-made DOM [`Node`] tree rather than markup.
//! Any HTML parser can produce the tree; the bundled [`ScraperParser`]
//! (feature `html`, on by default) uses html5ever through `scraper`.
//!
//! A conversion runs in three stages:
//!
//! - **Sanitize**: boilerplate subtrees (scripts, navigation, footers, page
//!   metadata) are dropped from a copy of the tree.
//! - **Render**: a recursive walk dispatches each element to the rule
//!   registered for its tag and concatenates the resulting fragments.
//! - **Post-process**: blank-line runs are collapsed, the document is trimmed
//!   and adjacent list items are tightened.
//!
//! Text is emitted verbatim. Markdown-significant characters in text, table
//! cells and link labels are not escaped.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use confmark::{Converter, Node};
//!
//! let converter = Converter::new();
//!
//! let h1 = Node::element("h1").with_text("Hello World");
//!
//! let markdown = converter.convert(&h1).unwrap();
//! assert_eq!(markdown, "# Hello World");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use confmark::Converter;
//!
//! let converter = Converter::new();
//! let markdown = converter
//!     .convert_html("<ul><li>a<ul><li>b</li></ul></li></ul>")
//!     .unwrap();
//! assert_eq!(markdown, "- a\n  - b");
//! ```

#[cfg(feature = "html")]
pub mod html;
mod language;
mod list;
pub mod node;
mod options;
mod parser;
mod postprocess;
mod rules;
pub mod sanitize;
mod service;
mod table;
mod utilities;
mod walk;

#[cfg(feature = "html")]
pub use html::{parse_html, ScraperParser};
pub use language::detect_language;
pub use list::{render_list, ListContext};
pub use node::{Element, Node, NodeKind};
pub use options::{ConvertOptions, NestedLists, DEFAULT_MAX_DEPTH};
pub use parser::MarkupParser;
pub use postprocess::post_process;
pub use rules::{ReplacementFn, Rule, Rules};
pub use sanitize::{default_denylist, sanitize, AttrOp, Filter, Sanitized};
pub use service::{ConversionInput, Converter};
pub use table::render_table;
pub use walk::Walk;

/// Error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// There was no root node, or the root carries no content at all.
    #[error("Empty input: nothing to convert")]
    EmptyInput,

    /// The markup parser rejected its input.
    #[error("Unparseable fragment: {0}")]
    UnparseableFragment(String),

    #[error("Recursion limit exceeded: nesting deeper than {limit} levels")]
    RecursionLimitExceeded { limit: usize },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
