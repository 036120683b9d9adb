//! Paragraph text access and inline span editing.
//!
//! A paragraph's own content excludes notes, annotations and drawing shapes:
//! those hold nested paragraphs of their own, which are visited separately.

use regex::Regex;

use crate::xml::{Element, Node, push_node};

pub(crate) const PARAGRAPH: &str = "text:p";
pub(crate) const SPAN: &str = "text:span";
pub(crate) const TEXT_STYLE_NAME: &str = "text:style-name";

const SPACE: &str = "text:s";
const SPACE_COUNT: &str = "text:c";
const TAB: &str = "text:tab";
const LINE_BREAK: &str = "text:line-break";

/// Longest run a single `text:s` expands to.
const MAX_SPACE_RUN: usize = u16::MAX as usize;

fn is_embedded(name: &str) -> bool {
    name == "text:note" || name == "office:annotation" || name.starts_with("draw:")
}

fn is_placeholder(name: &str) -> bool {
    matches!(name, SPACE | TAB | LINE_BREAK)
}

/// Text of a paragraph, with `text:s`, `text:tab` and `text:line-break`
/// expanded to the characters they stand for.
pub fn recursive_text(element: &Element) -> String {
    let mut out = String::new();
    collect_recursive_text(element, &mut out);
    out
}

fn collect_recursive_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => match child.name.as_str() {
                SPACE => {
                    let count = child
                        .attribute(SPACE_COUNT)
                        .and_then(|value| value.parse::<usize>().ok())
                        .map_or(1, |count| count.min(MAX_SPACE_RUN));
                    out.push_str(&" ".repeat(count));
                }
                TAB => out.push('\t'),
                LINE_BREAK => out.push('\n'),
                name if is_embedded(name) => {}
                _ => collect_recursive_text(child, out),
            },
        }
    }
}

/// `(style name, text)` for each span directly owned by the paragraph.
pub fn spans(element: &Element) -> Vec<(String, String)> {
    let mut out = Vec::new();
    collect_spans(element, &mut out);
    out
}

fn collect_spans(element: &Element, out: &mut Vec<(String, String)>) {
    for child in element.child_elements() {
        if child.name == SPAN {
            let style = child.attribute(TEXT_STYLE_NAME).unwrap_or_default();
            out.push((style.to_string(), recursive_text(child)));
            collect_spans(child, out);
        } else if !is_embedded(&child.name) {
            collect_spans(child, out);
        }
    }
}

fn strip_spans(element: &mut Element) -> usize {
    let mut removed = 0;
    let children = std::mem::take(&mut element.children);
    for child in children {
        match child {
            Node::Element(mut child) if child.name == SPAN => {
                removed += 1 + strip_spans(&mut child);
                for grandchild in child.children {
                    push_node(&mut element.children, grandchild);
                }
            }
            Node::Element(mut child) => {
                if !is_embedded(&child.name) {
                    removed += strip_spans(&mut child);
                }
                element.children.push(Node::Element(child));
            }
            text => push_node(&mut element.children, text),
        }
    }
    removed
}

fn wrap_matches(element: &mut Element, regex: &Regex, style_name: &str) -> usize {
    let mut created = 0;
    let children = std::mem::take(&mut element.children);
    for child in children {
        match child {
            Node::Text(text) => {
                created += split_text(&text, regex, style_name, &mut element.children);
            }
            Node::Element(mut child) => {
                // Spans never nest: text already inside a span is left alone.
                if child.name != SPAN && !is_embedded(&child.name) && !is_placeholder(&child.name)
                {
                    created += wrap_matches(&mut child, regex, style_name);
                }
                element.children.push(Node::Element(child));
            }
        }
    }
    created
}

fn split_text(text: &str, regex: &Regex, style_name: &str, out: &mut Vec<Node>) -> usize {
    let mut created = 0;
    let mut cursor = 0;
    for found in regex.find_iter(text) {
        if found.is_empty() {
            continue;
        }
        push_node(out, Node::Text(text[cursor..found.start()].to_string()));
        out.push(Node::Element(
            Element::new(SPAN)
                .with_attribute(TEXT_STYLE_NAME, style_name)
                .with_text(found.as_str()),
        ));
        cursor = found.end();
        created += 1;
    }
    push_node(out, Node::Text(text[cursor..].to_string()));
    created
}

/// Mutable handle on one `text:p` element.
pub struct Paragraph<'a> {
    element: &'a mut Element,
}

impl<'a> Paragraph<'a> {
    pub(crate) fn new(element: &'a mut Element) -> Self {
        Self { element }
    }

    pub fn recursive_text(&self) -> String {
        recursive_text(&*self.element)
    }

    pub fn style(&self) -> Option<&str> {
        self.element.attribute(TEXT_STYLE_NAME)
    }

    /// Set the paragraph-level style.
    pub fn set_style(&mut self, style_name: &str) {
        self.element.set_attribute(TEXT_STYLE_NAME, style_name);
    }

    /// Remove inline span markup, keeping its text. Returns the number of
    /// spans removed.
    pub fn strip_spans(&mut self) -> usize {
        strip_spans(self.element)
    }

    /// Wrap every non-empty match of `regex` in a span styled `style_name`.
    ///
    /// Matching runs per text node, so a match cannot straddle an element
    /// boundary such as a tab or an existing span. Returns the number of spans
    /// created.
    pub fn wrap_matches(&mut self, regex: &Regex, style_name: &str) -> usize {
        wrap_matches(self.element, regex, style_name)
    }

    pub fn spans(&self) -> Vec<(String, String)> {
        spans(&*self.element)
    }
}
