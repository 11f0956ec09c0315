use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{SiteError, io_error};

/// Where a site's inputs live and where it is written to.
///
/// Read from `site.toml`; every field is optional and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Copied verbatim into the output directory.
    pub static_dir: PathBuf,
    /// Markdown sources, one page per `.md` file.
    pub content_dir: PathBuf,
    /// HTML page template with `{{ Title }}` and `{{ Content }}` placeholders.
    pub template: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            static_dir: PathBuf::from("static"),
            content_dir: PathBuf::from("content"),
            template: PathBuf::from("template.html"),
            output_dir: PathBuf::from("public"),
        }
    }
}

impl SiteConfig {
    pub const FILE_NAME: &'static str = "site.toml";

    /// Load a config file. A missing file is not an error: it yields `Ok(None)`.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, SiteError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(io_error(config_path))?;

        let config: SiteConfig =
            toml::from_str(&content).map_err(|source| SiteError::Config {
                path: config_path.to_path_buf(),
                source,
            })?;

        let base = config_path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Some(config.relative_to(base)))
    }

    /// Resolve every relative path against `base`.
    pub fn relative_to(self, base: &Path) -> Self {
        SiteConfig {
            static_dir: base.join(self.static_dir),
            content_dir: base.join(self.content_dir),
            template: base.join(self.template),
            output_dir: base.join(self.output_dir),
        }
    }
}
