//! Runs `.test.md` fixtures: a TOML frontmatter block describing the expected
//! outcome, followed by the Markdown document under test.
//!
//! ```text
//! ---
//! description = "headings become h1..h6"
//! expect_html = "<div><h2>Sub</h2></div>"
//! ---
//! ## Sub
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::byte_offset_to_line;

const FIXTURE_SUFFIX: &str = ".test.md";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Human-readable fixture description.
    #[serde(default)]
    pub description: Option<String>,

    /// Expected rendered HTML, compared exactly.
    #[serde(default)]
    pub expect_html: Option<String>,

    /// Expected conversion error: the error's Display string must contain this substring.
    #[serde(default)]
    pub expect_error: Option<String>,

    /// If set, the failing block must start on this 1-based line.
    #[serde(default)]
    pub expect_error_line: Option<usize>,

    /// Expected page title, as the page generator would extract it.
    #[serde(default)]
    pub expect_title: Option<String>,
}

/// Split a fixture into its TOML config and Markdown body.
pub fn parse_fixture(content: &str) -> Result<(FixtureConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');

    let after_open = content
        .strip_prefix("---")
        .ok_or("missing opening --- frontmatter delimiter")?;
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest = &after_open[close_pos + "\n---".len()..];
    let body = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    let config: FixtureConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, body))
}

/// Check one fixture body against its expectations. Returns `Some(reason)` on mismatch.
pub fn check_fixture(config: &FixtureConfig, source: &str) -> Option<String> {
    let rendered = mdsite::markdown_to_html(source);

    let reason = match (&config.expect_error, &config.expect_html, rendered) {
        (Some(expected), _, Err(err)) => {
            let message = err.to_string();
            if !message.contains(expected.as_str()) {
                Some(format!(
                    "expected error containing \"{}\", got: {}",
                    expected, message
                ))
            } else {
                check_error_line(config.expect_error_line, source, err.span.as_ref())
            }
        }
        (Some(expected), _, Ok(html)) => Some(format!(
            "expected error containing \"{}\", but rendered: {}",
            expected, html
        )),
        (None, _, Err(err)) => Some(format!("unexpected conversion error: {}", err)),
        (None, Some(expected), Ok(html)) if html != *expected => Some(format!(
            "html mismatch\n  expected: {}\n  actual:   {}",
            expected, html
        )),
        (None, _, Ok(_)) => None,
    };
    if reason.is_some() {
        return reason;
    }

    let expected_title = config.expect_title.as_ref()?;
    match site::extract_title(source) {
        Ok(title) if title == *expected_title => None,
        Ok(title) => Some(format!(
            "title mismatch\n  expected: {}\n  actual:   {}",
            expected_title, title
        )),
        Err(err) => Some(format!("expected title \"{}\", got: {}", expected_title, err)),
    }
}

fn check_error_line(
    expected_line: Option<usize>,
    source: &str,
    span: Option<&std::ops::Range<usize>>,
) -> Option<String> {
    let expected_line = expected_line?;
    match span {
        Some(span) => {
            let actual_line = byte_offset_to_line(source, span.start);
            (actual_line != expected_line).then(|| {
                format!(
                    "expected error on line {}, but the failing block starts on line {}",
                    expected_line, actual_line
                )
            })
        }
        None => Some(format!(
            "expected error on line {}, but the error has no span",
            expected_line
        )),
    }
}

pub enum FixtureOutcome {
    Pass,
    Fail(String),
}

pub struct FixtureResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: FixtureOutcome,
}

impl FixtureResult {
    fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_suffix(FIXTURE_SUFFIX))
                .unwrap_or("?")
        })
    }
}

fn run_fixture(path: &Path) -> FixtureResult {
    let fail = |description: Option<String>, reason: String| FixtureResult {
        path: path.to_path_buf(),
        description,
        outcome: FixtureOutcome::Fail(reason),
    };

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return fail(None, format!("cannot read file: {}", e)),
    };

    let (config, source) = match parse_fixture(&content) {
        Ok(pair) => pair,
        Err(e) => return fail(None, format!("frontmatter error: {}", e)),
    };

    log::debug!("running fixture {}", path.display());
    match check_fixture(&config, source) {
        Some(reason) => fail(config.description, reason),
        None => FixtureResult {
            path: path.to_path_buf(),
            description: config.description,
            outcome: FixtureOutcome::Pass,
        },
    }
}

/// Discover fixtures grouped by category (subfolder relative to root).
/// Files directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_fixtures(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_fixtures(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_fixtures(&path, root, out);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(FIXTURE_SUFFIX))
        {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

/// List available categories for the given fixture path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (category, files) in &categories {
        eprintln!("  {} ({} fixtures)", category_label(category), files.len());
    }
}

/// Select the requested categories; a category also selects its subcategories.
fn select_categories<'a>(
    all: &'a BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'a str, &'a Vec<PathBuf>> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }

    let mut selected = BTreeMap::new();
    for request in requested {
        let request = request.trim_matches('/');
        let before = selected.len();
        for (category, files) in all {
            if category == request || category.starts_with(&format!("{}/", request)) {
                selected.insert(category.as_str(), files);
            }
        }
        if selected.len() == before {
            let available: Vec<&str> = all.keys().map(|k| category_label(k)).collect();
            eprintln!(
                "warning: category '{}' not found (available: {})",
                request,
                available.join(", ")
            );
        }
    }
    selected
}

struct Style {
    no_color: bool,
}

impl Style {
    fn paint(&self, text: &str, code: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        }
    }

    fn pass(&self) -> String {
        self.paint("PASS", "32")
    }

    fn fail(&self) -> String {
        self.paint("FAIL", "31")
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, "1")
    }
}

/// Run all fixtures under `path` (or a single fixture file).
/// If `categories` is non-empty, only fixtures in those categories run.
/// Returns the exit code: 0 when everything passes, 1 otherwise.
pub fn run_fixtures(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let style = Style { no_color };

    let groups: Vec<(String, Vec<PathBuf>)> = if path.is_file() {
        vec![(String::new(), vec![path.to_path_buf()])]
    } else {
        let all = discover_categorized(path);
        if all.is_empty() {
            eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
            return 1;
        }
        let selected = select_categories(&all, categories);
        if selected.is_empty() {
            eprintln!("no matching categories found");
            return 1;
        }
        selected
            .into_iter()
            .map(|(category, files)| (category.to_string(), files.clone()))
            .collect()
    };

    let mut passed = 0usize;
    let mut failures: Vec<FixtureResult> = Vec::new();

    for (category, files) in &groups {
        if !path.is_file() {
            eprintln!();
            eprintln!("{}", style.bold(category_label(category)));
        }

        for file in files {
            let result = run_fixture(file);
            match result.outcome {
                FixtureOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", style.pass(), result.label());
                }
                FixtureOutcome::Fail(_) => {
                    eprintln!("  {}  {}", style.fail(), result.label());
                    failures.push(result);
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for failure in &failures {
            eprintln!();
            eprintln!("  --- {} ---", failure.path.display());
            if let FixtureOutcome::Fail(reason) = &failure.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    if failures.is_empty() {
        eprintln!("test result: {}. {} passed, 0 failed", style.paint("ok", "32"), passed);
        0
    } else {
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            style.paint("FAILED", "31"),
            passed,
            failures.len(),
            passed + failures.len()
        );
        1
    }
}
