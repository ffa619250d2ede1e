use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

const MAX_BLOCKS: usize = 200;
const MAX_LIST_ITEMS: usize = 50;

/// Flat, display-ready representation of an editorial markup fragment.
///
/// Inline styling tags (`strong`, `em`, …) are flattened into their text;
/// anchors are lifted out as standalone [`ContentBlock::Link`] entries so the
/// UI can route every link through the system browser instead of following
/// whatever the markup embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Paragraph(String),
    Quote(String),
    List { ordered: bool, items: Vec<String> },
    Code(String),
    Link { text: String, href: String },
    Rule,
}

/// Parses a sanitized markup fragment (output of `sanitize::format_block` or
/// `sanitize::format_inline`) into renderable blocks. Never fails: unusable
/// markup degrades to its flattened text, an empty fragment to no blocks.
pub fn parse_blocks(markup: &str) -> Vec<ContentBlock> {
    if markup.trim().is_empty() {
        return Vec::new();
    }

    let doc = Html::parse_fragment(markup);
    let root = doc.root_element();
    let mut blocks = Vec::new();
    collect_blocks(&root, 0, &mut blocks);

    if blocks.is_empty() {
        // Inline-only fragments ("ligne 1<br>ligne 2") have no block element
        // to visit; fall back to the flattened root text.
        if let Some(text) = text_with_breaks(&root) {
            blocks.push(ContentBlock::Paragraph(text));
            collect_links(&root, &mut blocks);
        }
    }

    blocks.truncate(MAX_BLOCKS);
    blocks
}

fn collect_blocks(element: &ElementRef<'_>, depth: usize, out: &mut Vec<ContentBlock>) {
    if out.len() >= MAX_BLOCKS || depth > 40 {
        return;
    }

    for child in element.child_elements() {
        if out.len() >= MAX_BLOCKS {
            break;
        }
        if should_skip_subtree(&child) {
            continue;
        }

        match child.value().name() {
            "p" => {
                if let Some(text) = text_with_breaks(&child) {
                    out.push(ContentBlock::Paragraph(text));
                }
                collect_links(&child, out);
            }
            "blockquote" => {
                if let Some(text) = extract_blockquote_text(&child) {
                    out.push(ContentBlock::Quote(text));
                }
                collect_links(&child, out);
            }
            "ul" => {
                if let Some(items) = extract_list_items(&child) {
                    out.push(ContentBlock::List {
                        ordered: false,
                        items,
                    });
                }
            }
            "ol" => {
                if let Some(items) = extract_list_items(&child) {
                    out.push(ContentBlock::List {
                        ordered: true,
                        items,
                    });
                }
            }
            "code" | "pre" => {
                if let Some(text) = text_with_breaks(&child) {
                    out.push(ContentBlock::Code(text));
                }
            }
            "a" => {
                if let Some(link) = extract_link(&child) {
                    out.push(link);
                }
            }
            "hr" => out.push(ContentBlock::Rule),
            _ => collect_blocks(&child, depth + 1, out),
        }
    }
}

fn should_skip_subtree(element: &ElementRef<'_>) -> bool {
    matches!(
        element.value().name(),
        "script"
            | "style"
            | "noscript"
            | "iframe"
            | "form"
            | "button"
            | "input"
            | "textarea"
            | "select"
            | "option"
            | "canvas"
    )
}

/// Flattened text of a subtree, with `<br>` kept as a newline.
fn text_with_breaks(element: &ElementRef<'_>) -> Option<String> {
    let mut raw = String::new();
    push_text(element, &mut raw);

    let lines = raw
        .split('\n')
        .map(normalize_whitespace)
        .collect::<Vec<_>>();
    let text = lines.join("\n");
    let text = text.trim_matches('\n').to_string();
    (!text.trim().is_empty()).then_some(text)
}

fn push_text(element: &ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !should_skip_subtree(&child_el) {
                        push_text(&child_el, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn extract_blockquote_text(element: &ElementRef<'_>) -> Option<String> {
    let p_selector = Selector::parse("p").ok()?;
    let mut paragraphs = element
        .select(&p_selector)
        .filter_map(|p| text_with_breaks(&p))
        .collect::<Vec<_>>();

    if paragraphs.is_empty() {
        return text_with_breaks(element);
    }

    paragraphs.truncate(20);
    Some(paragraphs.join("\n\n"))
}

fn extract_list_items(list: &ElementRef<'_>) -> Option<Vec<String>> {
    let mut items = Vec::new();
    for child in list.child_elements() {
        if child.value().name() != "li" {
            continue;
        }
        if let Some(text) = text_with_breaks(&child) {
            items.push(text);
        }
        if items.len() >= MAX_LIST_ITEMS {
            break;
        }
    }
    (!items.is_empty()).then_some(items)
}

fn collect_links(element: &ElementRef<'_>, out: &mut Vec<ContentBlock>) {
    let Ok(a_selector) = Selector::parse("a") else {
        return;
    };
    for anchor in element.select(&a_selector) {
        if out.len() >= MAX_BLOCKS {
            break;
        }
        if let Some(link) = extract_link(&anchor) {
            out.push(link);
        }
    }
}

fn extract_link(anchor: &ElementRef<'_>) -> Option<ContentBlock> {
    let href = anchor.value().attr("href")?.trim().to_string();
    if href.is_empty() {
        return None;
    }
    let text = text_with_breaks(anchor)
        .map(|t| t.replace('\n', " "))
        .unwrap_or_else(|| href.clone());
    Some(ContentBlock::Link { text, href })
}

fn normalize_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_was_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out.trim().to_string()
}
