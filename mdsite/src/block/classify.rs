use crate::block::BlockKind;

pub(crate) const CODE_FENCE: &str = "```";
pub(crate) const QUOTE_MARKER: char = '>';
pub(crate) const UNORDERED_MARKER: &str = "- ";

const MAX_HEADING_LEVEL: usize = 6;

/// Classify a block by its text. The first matching rule wins:
/// heading, code, quote, unordered list, ordered list, then paragraph.
pub fn block_to_block_type(block: &str) -> BlockKind {
    if let Some(level) = heading_level(block) {
        return BlockKind::Heading(level);
    }

    let lines: Vec<&str> = block.split('\n').collect();

    if is_code(&lines) {
        BlockKind::Code
    } else if lines.iter().all(|line| line.starts_with(QUOTE_MARKER)) {
        BlockKind::Quote
    } else if lines.iter().all(|line| line.starts_with(UNORDERED_MARKER)) {
        BlockKind::UnorderedList
    } else if is_ordered_list(&lines) {
        BlockKind::OrderedList
    } else {
        BlockKind::Paragraph
    }
}

/// Level of a `#`-style heading: 1 to 6 `#` followed by a space.
pub(crate) fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=MAX_HEADING_LEVEL).contains(&hashes) && block[hashes..].starts_with(' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

/// Strip the `"{number}. "` marker of an ordered list line.
pub(crate) fn strip_ordered_marker(line: &str, number: usize) -> Option<&str> {
    line.strip_prefix(number.to_string().as_str())
        .and_then(|rest| rest.strip_prefix(". "))
}

fn is_code(lines: &[&str]) -> bool {
    match lines {
        [first, .., last] => first.starts_with(CODE_FENCE) && last.starts_with(CODE_FENCE),
        _ => false,
    }
}

/// Items must be numbered 1, 2, 3, ... with no gaps, repeats or other lines.
fn is_ordered_list(lines: &[&str]) -> bool {
    lines
        .iter()
        .enumerate()
        .all(|(i, line)| strip_ordered_marker(line, i + 1).is_some())
}
