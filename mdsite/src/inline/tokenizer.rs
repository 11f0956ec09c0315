use std::sync::OnceLock;

use regex::Regex;

use crate::error::MarkdownError;
use crate::inline::InlineNode;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Tokenize a span of text into a flat sequence of inline nodes.
///
/// Stages run in a fixed order, each consuming the previous stage's output:
/// bold, italic, code, images, links. Only nodes that are still plain text
/// are split by later stages, so delimiters inside an earlier match are kept
/// verbatim rather than nested.
pub fn text_to_textnodes(text: &str) -> Result<Vec<InlineNode>, MarkdownError> {
    let nodes = vec![InlineNode::Text(text.to_string())];
    let nodes = split_nodes_delimiter(nodes, "**", InlineNode::Bold)?;
    let nodes = split_nodes_delimiter(nodes, "_", InlineNode::Italic)?;
    let nodes = split_nodes_delimiter(nodes, "`", InlineNode::Code)?;
    let nodes = split_nodes_image(nodes)?;
    let nodes = split_nodes_link(nodes)?;
    log::trace!("tokenized {} bytes into {} inline nodes", text.len(), nodes.len());
    Ok(nodes)
}

/// Split every text node on `delimiter`, wrapping the odd-numbered fragments with `wrap`.
///
/// Fragments alternate plain/delimited starting with plain. Empty fragments are dropped.
/// Non-text nodes pass through unchanged.
pub fn split_nodes_delimiter(
    old_nodes: Vec<InlineNode>,
    delimiter: &str,
    wrap: fn(String) -> InlineNode,
) -> Result<Vec<InlineNode>, MarkdownError> {
    debug_assert!(!delimiter.is_empty(), "delimiter must not be empty");

    let mut new_nodes = Vec::with_capacity(old_nodes.len());
    for node in old_nodes {
        let InlineNode::Text(text) = node else {
            new_nodes.push(node);
            continue;
        };

        if text.matches(delimiter).count() % 2 != 0 {
            return Err(MarkdownError::UnclosedDelimiter {
                delimiter: delimiter.to_string(),
            });
        }

        for (i, part) in text.split(delimiter).enumerate() {
            if part.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                new_nodes.push(InlineNode::Text(part.to_string()));
            } else {
                new_nodes.push(wrap(part.to_string()));
            }
        }
    }

    Ok(new_nodes)
}

/// Find every `![alt](url)` in `text`, left to right.
pub fn extract_markdown_images(text: &str) -> Vec<(String, String)> {
    image_regex()
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Find every `[text](url)` in `text` that is not an image, left to right.
pub fn extract_markdown_links(text: &str) -> Vec<(String, String)> {
    let re = link_regex();
    let mut matches = Vec::new();
    let mut pos = 0;

    while let Some(caps) = re.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        // A `[` right after `!` opens an image; retry from the next byte.
        if preceded_by_bang(text, whole.start()) {
            pos = whole.start() + 1;
            continue;
        }
        matches.push((caps[1].to_string(), caps[2].to_string()));
        pos = whole.end();
    }

    matches
}

/// Split image syntax out of every text node.
pub fn split_nodes_image(old_nodes: Vec<InlineNode>) -> Result<Vec<InlineNode>, MarkdownError> {
    split_nodes_pattern(old_nodes, Pattern::Image)
}

/// Split link syntax out of every text node.
pub fn split_nodes_link(old_nodes: Vec<InlineNode>) -> Result<Vec<InlineNode>, MarkdownError> {
    split_nodes_pattern(old_nodes, Pattern::Link)
}

// ---------------------------------------------------------------------------
// Pattern extraction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Image,
    Link,
}

impl Pattern {
    fn extract(self, text: &str) -> Vec<(String, String)> {
        match self {
            Pattern::Image => extract_markdown_images(text),
            Pattern::Link => extract_markdown_links(text),
        }
    }

    /// The literal source text of a match.
    fn section(self, first: &str, url: &str) -> String {
        match self {
            Pattern::Image => format!("![{}]({})", first, url),
            Pattern::Link => format!("[{}]({})", first, url),
        }
    }

    fn find(self, haystack: &str, section: &str) -> Option<usize> {
        let mut from = 0;
        while let Some(offset) = haystack[from..].find(section) {
            let at = from + offset;
            if matches!(self, Pattern::Image) || !preceded_by_bang(haystack, at) {
                return Some(at);
            }
            from = at + 1;
        }
        None
    }

    fn node(self, first: String, url: String) -> InlineNode {
        match self {
            Pattern::Image => InlineNode::Image { alt: first, url },
            Pattern::Link => InlineNode::Link { text: first, url },
        }
    }
}

fn split_nodes_pattern(
    old_nodes: Vec<InlineNode>,
    pattern: Pattern,
) -> Result<Vec<InlineNode>, MarkdownError> {
    let mut new_nodes = Vec::with_capacity(old_nodes.len());

    for node in old_nodes {
        let InlineNode::Text(text) = node else {
            new_nodes.push(node);
            continue;
        };

        let found = pattern.extract(&text);
        if found.is_empty() {
            new_nodes.push(InlineNode::Text(text));
            continue;
        }

        let mut remaining = text.as_str();
        for (first, url) in found {
            let section = pattern.section(&first, &url);
            let Some(at) = pattern.find(remaining, &section) else {
                return Err(MarkdownError::MalformedSection { section });
            };

            let before = &remaining[..at];
            if !before.is_empty() {
                new_nodes.push(InlineNode::Text(before.to_string()));
            }
            new_nodes.push(pattern.node(first, url));
            remaining = &remaining[at + section.len()..];
        }

        if !remaining.is_empty() {
            new_nodes.push(InlineNode::Text(remaining.to_string()));
        }
    }

    Ok(new_nodes)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn image_regex() -> &'static Regex {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_REGEX.get_or_init(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("Invalid image regex"))
}

fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("Invalid link regex"))
}

fn preceded_by_bang(text: &str, at: usize) -> bool {
    at > 0 && text.as_bytes()[at - 1] == b'!'
}
