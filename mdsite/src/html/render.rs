use std::fmt::Write;

use crate::error::MarkdownError;
use crate::html::{Attributes, HtmlNode};

impl HtmlNode {
    /// Serialize this node and everything below it.
    ///
    /// Values are written as-is; no escaping is performed. The first invariant
    /// violation found aborts rendering of the whole tree.
    pub fn to_html(&self) -> Result<String, MarkdownError> {
        let mut out = String::new();
        render_into(self, &mut out)?;
        Ok(out)
    }
}

impl Attributes {
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

fn render_into(node: &HtmlNode, out: &mut String) -> Result<(), MarkdownError> {
    match node {
        HtmlNode::Leaf {
            tag,
            value,
            attributes,
        } => {
            let value = value.as_deref().ok_or(MarkdownError::MissingLeafValue)?;
            match tag {
                None => out.push_str(value),
                Some(tag) => {
                    let _ = write!(out, "<{}{}>{}</{}>", tag, attributes, value, tag);
                }
            }
        }
        HtmlNode::Parent {
            tag,
            children,
            attributes,
        } => {
            let tag = tag
                .as_deref()
                .filter(|t| !t.is_empty())
                .ok_or(MarkdownError::MissingParentTag)?;
            if children.is_empty() {
                return Err(MarkdownError::EmptyParentChildren);
            }

            let _ = write!(out, "<{}{}>", tag, attributes);
            for child in children {
                render_into(child, out)?;
            }
            let _ = write!(out, "</{}>", tag);
        }
    }
    Ok(())
}
