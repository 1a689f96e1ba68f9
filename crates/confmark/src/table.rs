//! Pipe-table rendering.

use crate::node::{Element, Node};

/// Render a table as a Markdown pipe table.
///
/// Rows are collected through any `thead`/`tbody`/`tfoot` wrapping. The first
/// row is the header; every later row becomes a data line. Cell text is
/// trimmed and emitted as-is. Rows are not padded to the header width.
pub fn render_table(table: &Element) -> String {
    let rows = collect_rows(table);
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let headers = row_cells(header);
    let mut result = format_row(&headers);
    result.push_str(&format_row(&vec!["---".to_string(); headers.len()]));

    for row in body {
        result.push_str(&format_row(&row_cells(row)));
    }

    result
}

/// `tr` descendants in document order, not looking into nested tables
fn collect_rows(table: &Element) -> Vec<&Element> {
    let mut rows = Vec::new();
    let mut stack: Vec<&Element> = table.children.iter().rev().filter_map(Node::as_element).collect();

    while let Some(element) = stack.pop() {
        match element.tag.as_str() {
            "tr" => rows.push(element),
            "table" => {}
            _ => stack.extend(element.children.iter().rev().filter_map(Node::as_element)),
        }
    }

    rows
}

fn row_cells(row: &Element) -> Vec<String> {
    row.element_children()
        .filter(|cell| cell.is("th") || cell.is("td"))
        .map(Element::trimmed_text)
        .collect()
}

fn format_row(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}
