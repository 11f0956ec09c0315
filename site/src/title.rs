use crate::error::SiteError;

const TITLE_PREFIX: &str = "# ";

/// The text of the first level-1 heading line, scanning top to bottom.
pub fn extract_title(markdown: &str) -> Result<String, SiteError> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix(TITLE_PREFIX))
        .map(str::to_string)
        .ok_or(SiteError::NoTitleFound)
}
