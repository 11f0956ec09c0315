use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use thiserror::Error;

/// Failures raised while tokenizing, converting or rendering a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownError {
    #[error("unclosed delimiter: `{delimiter}` appears an odd number of times")]
    UnclosedDelimiter { delimiter: String },
    #[error("malformed section: `{section}` was matched but could not be split out")]
    MalformedSection { section: String },
    #[error("leaf node has no value")]
    MissingLeafValue,
    #[error("parent node has no tag")]
    MissingParentTag,
    #[error("parent node has no children")]
    EmptyParentChildren,
}

/// A [`MarkdownError`] enriched with the byte span of the block that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct ConvertError {
    pub error: MarkdownError,
    /// Byte range of the offending block in the source document.
    /// `None` when the failure happened while rendering the finished tree.
    pub span: Option<Range<usize>>,
}

impl ConvertError {
    pub fn in_block(error: MarkdownError, span: Range<usize>) -> Self {
        ConvertError {
            error,
            span: Some(span),
        }
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::new(Severity::Error).with_message(self.error.to_string());
        match &self.span {
            Some(span) => diagnostic.with_labels(vec![
                Label::primary(file_id, span.clone()).with_message("in this block"),
            ]),
            None => diagnostic.with_notes(vec!["raised while rendering the document".into()]),
        }
    }
}

impl From<MarkdownError> for ConvertError {
    fn from(error: MarkdownError) -> Self {
        ConvertError { error, span: None }
    }
}
