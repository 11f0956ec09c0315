use mdsite::convert::block_to_html_node;
use mdsite::{
    BlockKind, ConvertError, HtmlNode, MarkdownError, markdown_to_html, markdown_to_html_node,
};
use pretty_assertions::assert_eq;

fn render(source: &str) -> String {
    markdown_to_html_node(source)
        .expect("conversion failed")
        .to_html()
        .expect("render failed")
}

#[test]
fn title_and_body() {
    assert_eq!(
        render("# Title\n\nBody text"),
        "<div><h1>Title</h1><p>Body text</p></div>"
    );
}

#[test]
fn paragraph_lines_are_joined() {
    let md = "
This is **bolded** paragraph
text in a p
tag here

";
    assert_eq!(
        render(md),
        "<div><p>This is <b>bolded</b> paragraph text in a p tag here</p></div>"
    );
}

#[test]
fn paragraphs() {
    let md = "
This is **bolded** paragraph
text in a p
tag here

This is another paragraph with _italic_ text and `code` here

";
    assert_eq!(
        render(md),
        "<div><p>This is <b>bolded</b> paragraph text in a p tag here</p><p>This is another paragraph with <i>italic</i> text and <code>code</code> here</p></div>"
    );
}

#[test]
fn lists() {
    let md = "
- This is a list
- with items
- and _more_ items

1. This is an `ordered` list
2. with items
3. and more items

";
    assert_eq!(
        render(md),
        "<div><ul><li>This is a list</li><li>with items</li><li>and <i>more</i> items</li></ul><ol><li>This is an <code>ordered</code> list</li><li>with items</li><li>and more items</li></ol></div>"
    );
}

#[test]
fn headings() {
    let md = "
# this is an h1

this is paragraph text

## this is an h2

###### this is an h6
";
    assert_eq!(
        render(md),
        "<div><h1>this is an h1</h1><p>this is paragraph text</p><h2>this is an h2</h2><h6>this is an h6</h6></div>"
    );
}

#[test]
fn heading_strips_exactly_one_space() {
    assert_eq!(render("##  spaced"), "<div><h2> spaced</h2></div>");
}

#[test]
fn blockquote() {
    let md = "
> This is a
> blockquote block

this is paragraph text

";
    assert_eq!(
        render(md),
        "<div><blockquote>This is a blockquote block</blockquote><p>this is paragraph text</p></div>"
    );
}

#[test]
fn blockquote_without_space_after_marker() {
    assert_eq!(
        render(">tight\n>  **loose**"),
        "<div><blockquote>tight <b>loose</b></blockquote></div>"
    );
}

#[test]
fn code_block_is_verbatim() {
    assert_eq!(
        render("```\nline one\nline two\n```"),
        "<div><pre><code>line one\nline two\n</code></pre></div>"
    );
    assert_eq!(
        render("```\nThis is text that _should_ remain\nthe **same** even with inline stuff\n```"),
        "<div><pre><code>This is text that _should_ remain\nthe **same** even with inline stuff\n</code></pre></div>"
    );
}

#[test]
fn code_block_drops_language_line() {
    assert_eq!(
        render("```rust\nfn main() {}\n```"),
        "<div><pre><code>fn main() {}\n</code></pre></div>"
    );
}

#[test]
fn code_block_trailing_newline_rules() {
    let empty_last = block_to_html_node("```\ncode\n\n```", BlockKind::Code).unwrap();
    assert_eq!(empty_last.to_html().unwrap(), "<pre><code>code\n</code></pre>");

    let no_interior = block_to_html_node("```\n```", BlockKind::Code).unwrap();
    assert_eq!(no_interior.to_html().unwrap(), "<pre><code></code></pre>");
}

#[test]
fn odd_delimiter_in_code_block_is_fine() {
    assert_eq!(
        render("```\nlet x = a ** b;\n```"),
        "<div><pre><code>let x = a ** b;\n</code></pre></div>"
    );
}

#[test]
fn links_and_images() {
    assert_eq!(
        render("Visit [the docs](https://docs.example) or see ![diagram](/img/diagram.png)"),
        "<div><p>Visit <a href=\"https://docs.example\">the docs</a> or see <img src=\"/img/diagram.png\" alt=\"diagram\"></img></p></div>"
    );
}

#[test]
fn root_holds_one_node_per_block() {
    let root = markdown_to_html_node("# A\n\ntext\n\n- x\n\n1. y\n\n> z\n\n```\nw\n```").unwrap();
    assert_eq!(root.tag(), Some("div"));
    let tags: Vec<Option<&str>> = root.children().iter().map(HtmlNode::tag).collect();
    assert_eq!(
        tags,
        vec![
            Some("h1"),
            Some("p"),
            Some("ul"),
            Some("ol"),
            Some("blockquote"),
            Some("pre"),
        ]
    );
}

#[test]
fn inline_error_carries_block_span() {
    let err = markdown_to_html_node("# Title\n\nbroken `code").unwrap_err();
    assert_eq!(
        err,
        ConvertError {
            error: MarkdownError::UnclosedDelimiter {
                delimiter: "`".into()
            },
            span: Some(9..21),
        }
    );
}

#[test]
fn render_error_is_attributed_to_its_block() {
    let source = "Intro\n\n>";
    // Conversion succeeds; the empty quote only fails once rendered.
    assert!(markdown_to_html_node(source).is_ok());
    let err = markdown_to_html(source).unwrap_err();
    assert_eq!(err.error, MarkdownError::EmptyParentChildren);
    assert_eq!(err.span, Some(7..8));
}

#[test]
fn empty_document_has_nothing_to_render() {
    let err = markdown_to_html("\n\n").unwrap_err();
    assert_eq!(err.error, MarkdownError::EmptyParentChildren);
    assert_eq!(err.span, None);
}

#[test]
fn markdown_to_html_matches_tree_rendering() {
    let source = "## Notes\n\n- **one**\n- two\n\nclosing `words`";
    assert_eq!(markdown_to_html(source).unwrap(), render(source));
}

#[test]
fn diagnostic_labels_the_block() {
    let err = markdown_to_html_node("ok\n\n_dangling").unwrap_err();
    let diagnostic = err.to_diagnostic(0);
    assert_eq!(diagnostic.labels.len(), 1);
    assert_eq!(diagnostic.labels[0].range, 4..13);
    assert!(diagnostic.message.contains("unclosed delimiter"));
}
