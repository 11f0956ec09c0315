//! Markdown to HTML conversion for a static site generator.
//!
//! A document is split into blocks on blank lines, each block is classified,
//! its inline markup is tokenized, and the result is assembled into a tree of
//! [`HtmlNode`]s under a single `div`. [`HtmlNode::to_html`] serializes the tree.

pub mod block;
pub mod convert;
pub mod error;
pub mod html;
pub mod inline;

pub use block::{Block, BlockKind, block_to_block_type, markdown_to_blocks};
pub use convert::{markdown_to_html, markdown_to_html_node, text_node_to_html_node};
pub use error::{ConvertError, MarkdownError};
pub use html::{Attributes, HtmlNode};
pub use inline::{InlineNode, text_to_textnodes};
