pub mod config;
pub mod copy;
pub mod error;
pub mod page;
pub mod template;
pub mod title;

pub use config::SiteConfig;
pub use copy::{CopyReport, copy_tree};
pub use error::SiteError;
pub use page::{generate_page, generate_pages_recursive};
pub use template::apply_template;
pub use title::extract_title;

/// Outcome of a full [`build_site`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub copied: CopyReport,
    pub pages: usize,
}

/// Copy the static tree into the output directory, then generate every page.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport, SiteError> {
    let copied = copy_tree(&config.static_dir, &config.output_dir)?;
    let pages =
        generate_pages_recursive(&config.content_dir, &config.template, &config.output_dir)?;
    log::info!(
        "built {} page(s) and copied {} static file(s) into {}",
        pages,
        copied.files,
        config.output_dir.display()
    );
    Ok(BuildReport { copied, pages })
}
