mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use mdsite::{BlockKind, ConvertError};
use site::{SiteConfig, SiteError};

#[derive(Parser)]
#[command(name = "sitegen", version, about = "Markdown static site generator")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the whole site: copy static files, then render every page
    Build(BuildArgs),

    /// Render a single Markdown document to stdout
    Render(RenderArgs),

    /// Run .test.md fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Site config file (defaults to ./site.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory copied verbatim into the output
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,

    /// Directory of Markdown sources
    #[arg(long)]
    content: Option<PathBuf>,

    /// HTML page template
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output directory (deleted and recreated)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Markdown source file to render
    file: String,

    /// List each block with its kind and starting line
    #[arg(long)]
    blocks: bool,

    /// Print the inline tokens of each non-code block
    #[arg(long)]
    tokens: bool,

    /// Dump the HTML node tree
    #[arg(long)]
    tree: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.md file or directory containing them
    path: String,

    /// Run only fixtures in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Command::Build(_) => "info",
        _ => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let color_choice = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    match cli.command {
        Command::Build(build_args) => do_build(build_args, color_choice),
        Command::Render(render_args) => do_render(render_args, color_choice),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_fixtures(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

/// Resolve the effective config: file values first, then command-line overrides.
fn resolve_config(args: BuildArgs) -> Result<SiteConfig, SiteError> {
    let mut config = match &args.config {
        Some(path) => SiteConfig::load_from_path(path)?.ok_or_else(|| SiteError::MissingSource {
            path: path.clone(),
        })?,
        None => SiteConfig::load_from_path(SiteConfig::FILE_NAME)?.unwrap_or_default(),
    };

    if let Some(dir) = args.static_dir {
        config.static_dir = dir;
    }
    if let Some(dir) = args.content {
        config.content_dir = dir;
    }
    if let Some(template) = args.template {
        config.template = template;
    }
    if let Some(dir) = args.output {
        config.output_dir = dir;
    }
    Ok(config)
}

fn do_build(args: BuildArgs, color_choice: ColorChoice) {
    let result = resolve_config(args).and_then(|config| {
        log::debug!("building with {:?}", config);
        site::build_site(&config)
    });

    match result {
        Ok(report) => {
            eprintln!(
                "ok: {} page(s) generated, {} static file(s) copied",
                report.pages, report.copied.files
            );
        }
        Err(error) => {
            report_site_error(&error, color_choice);
            process::exit(1);
        }
    }
}

fn do_render(args: RenderArgs, color_choice: ColorChoice) {
    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    if args.blocks || args.tokens {
        for block in mdsite::markdown_to_blocks(&source) {
            let kind = block.kind();
            let line = byte_offset_to_line(&source, block.span.start);
            if args.blocks {
                println!("{:>4}  {}", line, kind);
            }
            if args.tokens && kind != BlockKind::Code {
                match mdsite::text_to_textnodes(&block.text) {
                    Ok(tokens) => {
                        for token in tokens {
                            println!("      {:?}", token);
                        }
                    }
                    Err(error) => {
                        let error = ConvertError::in_block(error, block.span.clone());
                        emit(&error.to_diagnostic(file_id), &files, color_choice);
                        process::exit(1);
                    }
                }
            }
        }
        return;
    }

    if args.tree {
        match mdsite::markdown_to_html_node(&source) {
            Ok(node) => println!("{:#?}", node),
            Err(error) => {
                emit(&error.to_diagnostic(file_id), &files, color_choice);
                process::exit(1);
            }
        }
        return;
    }

    match mdsite::markdown_to_html(&source) {
        Ok(html) => println!("{}", html),
        Err(error) => {
            emit(&error.to_diagnostic(file_id), &files, color_choice);
            process::exit(1);
        }
    }
}

/// Conversion failures inside a document get a source diagnostic; anything
/// else is printed as a plain message.
fn report_site_error(error: &SiteError, color_choice: ColorChoice) {
    if let SiteError::Document { path, source } = error {
        if let SiteError::Convert { source_text, error } = source.as_ref() {
            let mut files = SimpleFiles::new();
            let file_id = files.add(path.display().to_string(), source_text.clone());
            emit(&error.to_diagnostic(file_id), &files, color_choice);
            return;
        }
    }
    eprintln!("error: {}", error);
}

fn emit(
    diagnostic: &Diagnostic<usize>,
    files: &SimpleFiles<String, String>,
    color_choice: ColorChoice,
) {
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, diagnostic);
}

/// Convert a byte offset to a 1-based line number.
pub(crate) fn byte_offset_to_line(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    source.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_numbers_are_one_based() {
        let source = "# Title\n\nbody\n";
        assert_eq!(byte_offset_to_line(source, 0), 1);
        assert_eq!(byte_offset_to_line(source, 9), 3);
        assert_eq!(byte_offset_to_line(source, 999), 4);
    }

    #[test]
    fn flags_override_defaults() {
        let config = resolve_config(BuildArgs {
            config: None,
            static_dir: None,
            content: Some(PathBuf::from("posts")),
            template: None,
            output: Some(PathBuf::from("dist")),
        })
        .unwrap();
        assert_eq!(config.content_dir, PathBuf::from("posts"));
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert_eq!(config.template, PathBuf::from("template.html"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = resolve_config(BuildArgs {
            config: Some(PathBuf::from("does/not/exist/site.toml")),
            static_dir: None,
            content: None,
            template: None,
            output: None,
        })
        .unwrap_err();
        assert!(matches!(err, SiteError::MissingSource { .. }));
    }
}
