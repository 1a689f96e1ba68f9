//! Markup parsing seam.

use crate::node::Node;
use crate::Result;

/// Turns raw markup into a [`Node`] tree.
///
/// The converter never parses markup itself. Implementations report parse
/// failures as [`ConvertError::UnparseableFragment`](crate::ConvertError).
pub trait MarkupParser {
    fn parse(&self, markup: &str) -> Result<Node>;
}

impl<F> MarkupParser for F
where
    F: Fn(&str) -> Result<Node>,
{
    fn parse(&self, markup: &str) -> Result<Node> {
        self(markup)
    }
}
