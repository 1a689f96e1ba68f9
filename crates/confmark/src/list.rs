//! Ordered and unordered list rendering.

use crate::node::{Element, Node};
use crate::options::NestedLists;
use crate::utilities::{indent, is_list};
use crate::walk::Walk;
use crate::Result;

/// Transient state for one list being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListContext {
    pub ordered: bool,
    /// Nesting level; each level indents items by two spaces
    pub depth: usize,
}

impl ListContext {
    pub fn top_level(ordered: bool) -> Self {
        Self { ordered, depth: 0 }
    }

    /// Context for a sublist, which keeps its own ordered flag
    fn nested(&self, list: &Element) -> Self {
        Self {
            ordered: list.is("ol"),
            depth: self.depth + 1,
        }
    }
}

/// Render the direct `li` children of `list`, one line per item.
///
/// Ordered items are numbered from 1, independently for every list. Nested
/// lists found inside an item are rendered right after the item's line, one
/// level deeper. Non-`li` children (usually whitespace) are ignored.
pub fn render_list(list: &Element, ctx: ListContext, walk: &Walk<'_>) -> Result<String> {
    let walk = walk.with_lists();
    let prefix_indent = indent(ctx.depth);
    let mut result = String::new();
    let mut counter = 1;

    for item in list.element_children().filter(|c| c.is("li")) {
        let item_walk = walk.descend()?;
        let content = item_walk.without_lists().render_children(item)?;

        result.push_str(&prefix_indent);
        if ctx.ordered {
            result.push_str(&format!("{counter}. "));
            counter += 1;
        } else {
            result.push_str("- ");
        }
        result.push_str(content.trim());
        result.push('\n');

        let sublists = nested_lists(item);
        let limit = match walk.options().nested_lists {
            NestedLists::FirstOnly => 1,
            NestedLists::All => sublists.len(),
        };
        for sublist in sublists.into_iter().take(limit) {
            result.push_str(&render_list(sublist, ctx.nested(sublist), &item_walk)?);
        }
    }

    Ok(result)
}

/// Outermost `ul`/`ol` descendants of an item, in document order.
///
/// Lists nested inside those belong to them and are not returned.
fn nested_lists(item: &Element) -> Vec<&Element> {
    let mut found = Vec::new();
    let mut stack: Vec<&Element> = item.children.iter().rev().filter_map(Node::as_element).collect();

    while let Some(element) = stack.pop() {
        if is_list(element) {
            found.push(element);
        } else {
            stack.extend(element.children.iter().rev().filter_map(Node::as_element));
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConvertOptions, Rules};

    fn li(text: &str) -> Node {
        Node::element("li").with_text(text)
    }

    fn render(list: &Node, options: &ConvertOptions) -> String {
        let rules = Rules::new();
        let walk = Walk::new(&rules, options);
        let element = list.as_element().unwrap();
        render_list(element, ListContext::top_level(element.is("ol")), &walk).unwrap()
    }

    #[test]
    fn test_unordered() {
        let ul = Node::element("ul").with_child(li("One")).with_child(li("Two"));
        assert_eq!(render(&ul, &ConvertOptions::default()), "- One\n- Two\n");
    }

    #[test]
    fn test_ordered() {
        let ol = Node::element("ol")
            .with_child(li("One"))
            .with_child(li("Two"))
            .with_child(li("Three"));
        assert_eq!(render(&ol, &ConvertOptions::default()), "1. One\n2. Two\n3. Three\n");
    }

    #[test]
    fn test_ignores_non_item_children() {
        let ul = Node::element("ul")
            .with_text("\n   ")
            .with_child(li("One"))
            .with_child(Node::element("div").with_text("stray"))
            .with_text("\n");
        assert_eq!(render(&ul, &ConvertOptions::default()), "- One\n");
    }

    #[test]
    fn test_nested_list_is_indented() {
        let ul = Node::element("ul").with_child(
            Node::element("li")
                .with_text("a")
                .with_child(Node::element("ul").with_child(li("b"))),
        );
        assert_eq!(render(&ul, &ConvertOptions::default()), "- a\n  - b\n");
    }

    #[test]
    fn test_nested_numbering_restarts() {
        let ol = Node::element("ol")
            .with_child(li("one"))
            .with_child(
                Node::element("li")
                    .with_text("two")
                    .with_child(Node::element("ol").with_child(li("x")).with_child(li("y"))),
            )
            .with_child(li("three"));
        assert_eq!(
            render(&ol, &ConvertOptions::default()),
            "1. one\n2. two\n  1. x\n  2. y\n3. three\n"
        );
    }

    #[test]
    fn test_nested_list_keeps_own_kind() {
        let ol = Node::element("ol").with_child(
            Node::element("li")
                .with_text("step")
                .with_child(Node::element("ul").with_child(li("note"))),
        );
        assert_eq!(render(&ol, &ConvertOptions::default()), "1. step\n  - note\n");
    }

    #[test]
    fn test_nested_list_inside_wrapper() {
        let ul = Node::element("ul").with_child(
            Node::element("li").with_text("a").with_child(
                Node::element("div").with_child(Node::element("ol").with_child(li("b"))),
            ),
        );
        assert_eq!(render(&ul, &ConvertOptions::default()), "- a\n  1. b\n");
    }

    fn two_sublists() -> Node {
        Node::element("ul").with_child(
            Node::element("li")
                .with_text("a")
                .with_child(Node::element("ul").with_child(li("b")))
                .with_child(Node::element("ol").with_child(li("c"))),
        )
    }

    #[test]
    fn test_only_first_sublist_by_default() {
        assert_eq!(render(&two_sublists(), &ConvertOptions::default()), "- a\n  - b\n");
    }

    #[test]
    fn test_all_sublists_when_enabled() {
        let options = ConvertOptions::default().with_nested_lists(NestedLists::All);
        assert_eq!(render(&two_sublists(), &options), "- a\n  - b\n  1. c\n");
    }

    #[test]
    fn test_three_levels() {
        let ul = Node::element("ul").with_child(
            Node::element("li").with_text("a").with_child(
                Node::element("ul").with_child(
                    Node::element("li")
                        .with_text("b")
                        .with_child(Node::element("ul").with_child(li("c"))),
                ),
            ),
        );
        assert_eq!(render(&ul, &ConvertOptions::default()), "- a\n  - b\n    - c\n");
    }

    #[test]
    fn test_item_inline_formatting() {
        let ul = Node::element("ul").with_child(
            Node::element("li")
                .with_text(" see ")
                .with_child(
                    Node::element_with_attrs("a", vec![("href", "/x")]).with_text("docs"),
                ),
        );
        assert_eq!(render(&ul, &ConvertOptions::default()), "- see [docs](/x)\n");
    }
}
