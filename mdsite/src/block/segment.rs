use crate::block::Block;

const BLOCK_SEPARATOR: &str = "\n\n";

/// Split a document into blocks on blank lines.
///
/// Each piece is trimmed; pieces left empty by trimming are dropped, so runs of
/// blank lines never produce empty blocks. Order is preserved.
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut offset = 0;

    for piece in markdown.split(BLOCK_SEPARATOR) {
        let piece_start = offset;
        offset += piece.len() + BLOCK_SEPARATOR.len();

        let text = piece.trim();
        if text.is_empty() {
            continue;
        }

        let start = piece_start + (piece.len() - piece.trim_start().len());
        blocks.push(Block {
            text: text.to_string(),
            span: start..start + text.len(),
        });
    }

    blocks
}
