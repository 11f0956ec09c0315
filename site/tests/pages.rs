use std::fs;
use std::path::Path;

use mdsite::MarkdownError;
use pretty_assertions::assert_eq;
use site::{
    BuildReport, CopyReport, SiteConfig, SiteError, build_site, copy_tree, generate_page,
    generate_pages_recursive,
};
use tempfile::TempDir;

const TEMPLATE: &str = "<html><head><title>{{ Title }}</title></head><body>{{ Content }}</body></html>";

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn generates_a_page_from_template() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("index.md"), "# Tolkien Fan Club\n\n**I like Tolkien**.");
    write(&root.join("template.html"), TEMPLATE);

    let dest = root.join("public/nested/index.html");
    generate_page(&root.join("index.md"), &root.join("template.html"), &dest).unwrap();

    assert_eq!(
        read(&dest),
        "<html><head><title>Tolkien Fan Club</title></head><body><div><h1>Tolkien Fan Club</h1><p><b>I like Tolkien</b>.</p></div></body></html>"
    );
}

#[test]
fn page_without_title_names_the_document() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("notes.md"), "just text");
    write(&root.join("template.html"), TEMPLATE);

    let err = generate_page(
        &root.join("notes.md"),
        &root.join("template.html"),
        &root.join("out.html"),
    )
    .unwrap_err();

    match err {
        SiteError::Document { path, source } => {
            assert_eq!(path, root.join("notes.md"));
            assert!(matches!(*source, SiteError::NoTitleFound));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!root.join("out.html").exists());
}

#[test]
fn conversion_failure_keeps_source_and_span() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("bad.md"), "# Bad\n\nan **unclosed bold");
    write(&root.join("template.html"), TEMPLATE);

    let err = generate_page(
        &root.join("bad.md"),
        &root.join("template.html"),
        &root.join("bad.html"),
    )
    .unwrap_err();

    let SiteError::Document { source, .. } = err else {
        panic!("expected a document error");
    };
    let SiteError::Convert { source_text, error } = *source else {
        panic!("expected a conversion error");
    };
    assert_eq!(source_text, "# Bad\n\nan **unclosed bold");
    assert_eq!(
        error.error,
        MarkdownError::UnclosedDelimiter {
            delimiter: "**".into()
        }
    );
    assert_eq!(error.span, Some(7..25));
}

#[test]
fn missing_template_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("index.md"), "# Home");

    let err = generate_page(
        &root.join("index.md"),
        &root.join("missing.html"),
        &root.join("index.html"),
    )
    .unwrap_err();
    assert!(matches!(err, SiteError::Io { ref path, .. } if path.ends_with("missing.html")));
}

#[test]
fn copy_tree_replaces_destination() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("static/index.css"), "body {}");
    write(&root.join("static/images/logo.png"), "png");
    write(&root.join("static/images/icons/x.svg"), "<svg/>");
    write(&root.join("public/stale.html"), "old");

    let report = copy_tree(&root.join("static"), &root.join("public")).unwrap();

    assert_eq!(
        report,
        CopyReport {
            files: 3,
            directories: 3,
        }
    );
    assert_eq!(read(&root.join("public/index.css")), "body {}");
    assert_eq!(read(&root.join("public/images/logo.png")), "png");
    assert_eq!(read(&root.join("public/images/icons/x.svg")), "<svg/>");
    assert!(!root.join("public/stale.html").exists());
}

#[test]
fn copy_tree_requires_source() {
    let dir = TempDir::new().unwrap();
    let err = copy_tree(&dir.path().join("nope"), &dir.path().join("public")).unwrap_err();
    assert!(matches!(err, SiteError::MissingSource { .. }));
}

#[test]
fn generates_pages_recursively() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("content/index.md"), "# Home\n\nWelcome");
    write(&root.join("content/blog/first/index.md"), "# First\n\n- a\n- b");
    write(&root.join("content/blog/notes.txt"), "ignored");
    write(&root.join("template.html"), "{{ Title }}|{{ Content }}");

    let pages = generate_pages_recursive(
        &root.join("content"),
        &root.join("template.html"),
        &root.join("public"),
    )
    .unwrap();

    assert_eq!(pages, 2);
    assert_eq!(
        read(&root.join("public/index.html")),
        "Home|<div><h1>Home</h1><p>Welcome</p></div>"
    );
    assert_eq!(
        read(&root.join("public/blog/first/index.html")),
        "First|<div><h1>First</h1><ul><li>a</li><li>b</li></ul></div>"
    );
    assert!(!root.join("public/blog/notes.txt").exists());
    assert!(!root.join("public/blog/notes.html").exists());
}

#[test]
fn builds_a_whole_site() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("static/index.css"), "p {}");
    write(&root.join("content/index.md"), "# Site\n\n> quoted");
    write(&root.join("template.html"), TEMPLATE);

    let config = SiteConfig::default().relative_to(root);
    let report = build_site(&config).unwrap();

    assert_eq!(
        report,
        BuildReport {
            copied: CopyReport {
                files: 1,
                directories: 1,
            },
            pages: 1,
        }
    );
    assert_eq!(read(&root.join("public/index.css")), "p {}");
    assert!(read(&root.join("public/index.html")).contains("<blockquote>quoted</blockquote>"));
}
