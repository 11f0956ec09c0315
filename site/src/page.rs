use std::fs;
use std::path::Path;

use crate::copy::sorted_entries;
use crate::error::{SiteError, io_error};
use crate::template::apply_template;
use crate::title::extract_title;

const MARKDOWN_EXTENSION: &str = "md";
const HTML_EXTENSION: &str = "html";

/// Convert one Markdown file into a full HTML page using `template_path`.
///
/// Missing parent directories of `dest_path` are created. Failures that belong
/// to the document are wrapped with its path.
pub fn generate_page(
    from_path: &Path,
    template_path: &Path,
    dest_path: &Path,
) -> Result<(), SiteError> {
    log::info!(
        "generating page from {} to {} using {}",
        from_path.display(),
        dest_path.display(),
        template_path.display()
    );

    let markdown = fs::read_to_string(from_path).map_err(io_error(from_path))?;
    let template = fs::read_to_string(template_path).map_err(io_error(template_path))?;

    let content = match mdsite::markdown_to_html(&markdown) {
        Ok(html) => html,
        Err(error) => {
            return Err(SiteError::Convert {
                source_text: markdown,
                error,
            }
            .in_document(from_path));
        }
    };
    let title = extract_title(&markdown).map_err(|e| e.in_document(from_path))?;

    let page = apply_template(&template, &title, &content);

    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(dest_path, page).map_err(io_error(dest_path))
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory layout into `dest_dir` with an `.html` extension.
///
/// Returns the number of pages written. Other files are ignored.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
) -> Result<usize, SiteError> {
    if !content_dir.is_dir() {
        return Err(SiteError::MissingSource {
            path: content_dir.to_path_buf(),
        });
    }

    let mut pages = 0;
    for path in sorted_entries(content_dir)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = dest_dir.join(name);

        if path.is_dir() {
            pages += generate_pages_recursive(&path, template_path, &target)?;
        } else if path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION) {
            generate_page(&path, template_path, &target.with_extension(HTML_EXTENSION))?;
            pages += 1;
        } else {
            log::debug!("skipping non-markdown file {}", path.display());
        }
    }

    Ok(pages)
}
