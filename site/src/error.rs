use std::path::{Path, PathBuf};

use mdsite::ConvertError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no title found: no line starts with `# `")]
    NoTitleFound,

    #[error("source path does not exist: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A document failed to convert. Keeps the document text so the failing
    /// block can be shown in a diagnostic.
    #[error("{error}")]
    Convert {
        source_text: String,
        #[source]
        error: ConvertError,
    },

    #[error("failed to parse config file at {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Any of the above, raised while generating the page for `path`.
    #[error("{}: {source}", path.display())]
    Document {
        path: PathBuf,
        source: Box<SiteError>,
    },
}

impl SiteError {
    /// Attach the path of the document being generated.
    pub fn in_document(self, path: &Path) -> Self {
        SiteError::Document {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }
}

pub(crate) fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}
