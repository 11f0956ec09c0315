pub mod tokenizer;

use std::fmt;

pub use tokenizer::{
    extract_markdown_images, extract_markdown_links, split_nodes_delimiter, split_nodes_image,
    split_nodes_link, text_to_textnodes,
};

/// A single inline span produced by the tokenizer.
/// Inline nodes never nest: a block's inline content is a flat sequence of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

impl InlineNode {
    /// Whether this node is still plain text and may be split further.
    pub fn is_text(&self) -> bool {
        matches!(self, InlineNode::Text(_))
    }
}

impl fmt::Display for InlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineNode::Text(s) => write!(f, "{}", s),
            InlineNode::Bold(s) => write!(f, "**{}**", s),
            InlineNode::Italic(s) => write!(f, "_{}_", s),
            InlineNode::Code(s) => write!(f, "`{}`", s),
            InlineNode::Link { text, url } => write!(f, "[{}]({})", text, url),
            InlineNode::Image { alt, url } => write!(f, "![{}]({})", alt, url),
        }
    }
}
