pub mod classify;
pub mod segment;

use std::fmt;
use std::ops::Range;

pub use classify::block_to_block_type;
pub use segment::markdown_to_blocks;

/// A run of lines separated from its neighbours by blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The block text, trimmed of surrounding whitespace. Interior newlines are kept.
    pub text: String,
    /// Byte span of `text` in the source document, for error reporting.
    pub span: Range<usize>,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        block_to_block_type(&self.text)
    }
}

/// The structural kind of a block, derived purely from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    /// Heading level: 1 (`#`) through 6 (`######`).
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Paragraph => write!(f, "paragraph"),
            BlockKind::Heading(level) => write!(f, "heading {}", level),
            BlockKind::Code => write!(f, "code"),
            BlockKind::Quote => write!(f, "quote"),
            BlockKind::UnorderedList => write!(f, "unordered list"),
            BlockKind::OrderedList => write!(f, "ordered list"),
        }
    }
}
