//! Built-in rules for wiki page content.
//!
//! `T` below is the trimmed text content of the element and `C` the rendered
//! children. Block rules own their surrounding newlines; inline rules never
//! emit block separation.

use super::Rule;
use crate::language::detect_language;
use crate::list::{render_list, ListContext};
use crate::node::Element;
use crate::table::render_table;
use crate::utilities::{non_empty, quote_lines, CONTAINER_ELEMENTS};
use crate::walk::Walk;
use crate::Result;

/// Create all built-in rules
pub fn standard_rules() -> Vec<Rule> {
    vec![
        Rule::for_tags(&["h1", "h2", "h3", "h4", "h5", "h6"], heading),
        Rule::for_tag("p", paragraph),
        Rule::for_tag("br", line_break),
        Rule::for_tags(&["strong", "b"], strong),
        Rule::for_tags(&["em", "i"], emphasis),
        Rule::for_tag("code", code),
        Rule::for_tag("pre", code_block),
        Rule::for_tag("a", link),
        Rule::for_tag("img", image),
        Rule::for_tag("ul", |element, walk| list(element, false, walk)),
        Rule::for_tag("ol", |element, walk| list(element, true, walk)),
        Rule::for_tag("li", container),
        Rule::for_tag("blockquote", blockquote),
        Rule::for_tag("table", table),
        Rule::for_tag("hr", horizontal_rule),
        Rule::for_tags(CONTAINER_ELEMENTS, container),
    ]
}

/// `\n{#×level} T\n\n`
fn heading(element: &Element, _: &Walk<'_>) -> Result<String> {
    let level: usize = element.tag[1..].parse().unwrap_or(1);
    Ok(format!(
        "\n{} {}\n\n",
        "#".repeat(level),
        element.trimmed_text()
    ))
}

fn paragraph(element: &Element, walk: &Walk<'_>) -> Result<String> {
    Ok(format!("\n{}\n\n", walk.render_children(element)?))
}

fn line_break(_: &Element, _: &Walk<'_>) -> Result<String> {
    Ok("  \n".to_string())
}

fn strong(element: &Element, _: &Walk<'_>) -> Result<String> {
    Ok(format!("**{}**", element.trimmed_text()))
}

fn emphasis(element: &Element, _: &Walk<'_>) -> Result<String> {
    Ok(format!("*{}*", element.trimmed_text()))
}

/// Code span, or bare text when the enclosing `pre` supplies the fence
fn code(element: &Element, walk: &Walk<'_>) -> Result<String> {
    let text = element.trimmed_text();
    if walk.in_pre() {
        Ok(text)
    } else {
        Ok(format!("`{}`", text))
    }
}

fn code_block(element: &Element, _: &Walk<'_>) -> Result<String> {
    let code = match element.find_descendant(|e| e.is("code")) {
        Some(code) => code.trimmed_text(),
        None => element.trimmed_text(),
    };
    let language = detect_language(element);
    Ok(format!("\n```{}\n{}\n```\n\n", language, code))
}

fn link(element: &Element, _: &Walk<'_>) -> Result<String> {
    let text = element.trimmed_text();
    match non_empty(element.attr("href")) {
        Some(href) => Ok(format!("[{}]({})", text, href)),
        None => Ok(text),
    }
}

fn image(element: &Element, _: &Walk<'_>) -> Result<String> {
    let alt = non_empty(element.attr("alt")).unwrap_or("image");
    let src = element.attr("src").unwrap_or("");
    Ok(format!("![{}]({})", alt, src))
}

/// Lists pack tighter than paragraphs: one newline on each side
fn list(element: &Element, ordered: bool, walk: &Walk<'_>) -> Result<String> {
    let items = render_list(element, ListContext::top_level(ordered), walk)?;
    Ok(format!("\n{}\n", items))
}

/// Quotes the trimmed content so no bare `>` lines open or close the block
fn blockquote(element: &Element, walk: &Walk<'_>) -> Result<String> {
    let content = walk.render_children(element)?;
    let content = content.trim();
    if content.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("\n{}\n\n", quote_lines(content)))
}

fn table(element: &Element, _: &Walk<'_>) -> Result<String> {
    Ok(format!("\n{}\n\n", render_table(element)))
}

fn horizontal_rule(_: &Element, _: &Walk<'_>) -> Result<String> {
    Ok("\n---\n\n".to_string())
}

fn container(element: &Element, walk: &Walk<'_>) -> Result<String> {
    walk.render_children(element)
}
