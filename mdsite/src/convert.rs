use crate::block::classify::{QUOTE_MARKER, UNORDERED_MARKER, strip_ordered_marker};
use crate::block::{Block, BlockKind, markdown_to_blocks};
use crate::error::{ConvertError, MarkdownError};
use crate::html::HtmlNode;
use crate::inline::{InlineNode, text_to_textnodes};

/// Tag of the node wrapping a whole document.
pub const ROOT_TAG: &str = "div";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert a Markdown document into a single `div` holding one node per block.
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode, ConvertError> {
    let blocks = markdown_to_blocks(markdown);
    let children = convert_blocks(&blocks)?;
    Ok(HtmlNode::parent(ROOT_TAG, children))
}

/// Convert and render a Markdown document.
///
/// Rendering failures are attributed to the first block whose node fails to render.
pub fn markdown_to_html(markdown: &str) -> Result<String, ConvertError> {
    let blocks = markdown_to_blocks(markdown);
    let root = HtmlNode::parent(ROOT_TAG, convert_blocks(&blocks)?);

    root.to_html().map_err(|error| {
        blocks
            .iter()
            .zip(root.children())
            .find_map(|(block, node)| {
                node.to_html()
                    .err()
                    .map(|e| ConvertError::in_block(e, block.span.clone()))
            })
            .unwrap_or_else(|| ConvertError::from(error))
    })
}

/// Convert one block of the given kind into its HTML node.
pub fn block_to_html_node(block: &str, kind: BlockKind) -> Result<HtmlNode, MarkdownError> {
    match kind {
        BlockKind::Paragraph => paragraph_to_html_node(block),
        BlockKind::Heading(level) => heading_to_html_node(block, level),
        BlockKind::Code => Ok(code_to_html_node(block)),
        BlockKind::Quote => quote_to_html_node(block),
        BlockKind::UnorderedList => unordered_list_to_html_node(block),
        BlockKind::OrderedList => ordered_list_to_html_node(block),
    }
}

/// Map one inline node onto the HTML leaf that renders it.
pub fn text_node_to_html_node(node: &InlineNode) -> HtmlNode {
    match node {
        InlineNode::Text(text) => HtmlNode::text(text),
        InlineNode::Bold(text) => HtmlNode::leaf("b", text),
        InlineNode::Italic(text) => HtmlNode::leaf("i", text),
        InlineNode::Code(text) => HtmlNode::leaf("code", text),
        InlineNode::Link { text, url } => HtmlNode::leaf("a", text).with_attribute("href", url),
        InlineNode::Image { alt, url } => HtmlNode::leaf("img", "")
            .with_attribute("src", url)
            .with_attribute("alt", alt),
    }
}

/// Tokenize `text` and map every inline node to HTML.
pub fn text_to_children(text: &str) -> Result<Vec<HtmlNode>, MarkdownError> {
    let nodes = text_to_textnodes(text)?;
    Ok(nodes.iter().map(text_node_to_html_node).collect())
}

// ---------------------------------------------------------------------------
// Per-kind conversion
// ---------------------------------------------------------------------------

fn convert_blocks(blocks: &[Block]) -> Result<Vec<HtmlNode>, ConvertError> {
    blocks
        .iter()
        .map(|block| {
            let kind = block.kind();
            log::debug!("block at {:?} classified as {}", block.span, kind);
            block_to_html_node(&block.text, kind)
                .map_err(|e| ConvertError::in_block(e, block.span.clone()))
        })
        .collect()
}

fn paragraph_to_html_node(block: &str) -> Result<HtmlNode, MarkdownError> {
    let paragraph = block.split('\n').collect::<Vec<_>>().join(" ");
    Ok(HtmlNode::parent("p", text_to_children(&paragraph)?))
}

fn heading_to_html_node(block: &str, level: u8) -> Result<HtmlNode, MarkdownError> {
    // `level` hashes plus exactly one space.
    let text = block
        .get(level as usize..)
        .and_then(|rest| rest.strip_prefix(' '))
        .unwrap_or(block);
    Ok(HtmlNode::parent(format!("h{}", level), text_to_children(text)?))
}

/// Code content is inserted verbatim: fence lines are dropped and no inline
/// markup is interpreted.
fn code_to_html_node(block: &str) -> HtmlNode {
    let lines: Vec<&str> = block.split('\n').collect();

    let interior = lines.get(1..lines.len().saturating_sub(1)).unwrap_or(&[]);
    let mut text = interior.join("\n");
    if interior.last().is_some_and(|line| !line.is_empty()) {
        text.push('\n');
    }

    HtmlNode::parent("pre", vec![HtmlNode::leaf("code", text)])
}

fn quote_to_html_node(block: &str) -> Result<HtmlNode, MarkdownError> {
    let quote = block
        .split('\n')
        .map(|line| line.strip_prefix(QUOTE_MARKER).unwrap_or(line).trim())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(HtmlNode::parent("blockquote", text_to_children(&quote)?))
}

fn unordered_list_to_html_node(block: &str) -> Result<HtmlNode, MarkdownError> {
    let items = block
        .split('\n')
        .map(|line| {
            let item = line.strip_prefix(UNORDERED_MARKER).unwrap_or(line);
            list_item(item)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("ul", items))
}

fn ordered_list_to_html_node(block: &str) -> Result<HtmlNode, MarkdownError> {
    let items = block
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let item = strip_ordered_marker(line, i + 1).unwrap_or(line);
            list_item(item)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("ol", items))
}

fn list_item(item: &str) -> Result<HtmlNode, MarkdownError> {
    Ok(HtmlNode::parent("li", text_to_children(item)?))
}
