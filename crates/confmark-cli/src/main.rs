//! confmark CLI - convert a wiki page HTML fragment to Markdown.
//!
//! Reads HTML from a file or stdin and writes Markdown to stdout or a file.
//! Fetching pages and choosing file names are left to the caller.

mod error;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use confmark::{ConvertOptions, Converter, Filter, NestedLists, DEFAULT_MAX_DEPTH};
use tracing_subscriber::EnvFilter;

use error::CliError;

/// Convert an HTML fragment (the content region of a wiki page) to Markdown.
#[derive(Parser, Debug)]
#[command(name = "confmark", version, about)]
struct Args {
    /// HTML file to convert; `-` or nothing reads stdin
    input: Option<PathBuf>,

    /// Write Markdown here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Page title emitted as a leading `# Title` heading
    #[arg(short, long)]
    title: Option<String>,

    /// Maximum element nesting before the conversion is aborted
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Render every nested list of an item, not just the first
    #[arg(long)]
    all_nested_lists: bool,

    /// Extra selector to strip before conversion (`tag`, `.class`,
    /// `[attr]`, `[attr="v"]`, `[attr*="v"]`); can be repeated
    #[arg(long = "remove", value_name = "SELECTOR")]
    remove: Vec<String>,

    /// Do not strip the built-in boilerplate selectors
    #[arg(long)]
    no_default_denylist: bool,

    /// Skip the sanitizing pre-pass entirely
    #[arg(long)]
    no_sanitize: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn convert_options(&self) -> Result<ConvertOptions, CliError> {
        let mut options = ConvertOptions::default()
            .with_max_depth(self.max_depth)
            .with_sanitize(!self.no_sanitize);

        if let Some(title) = &self.title {
            options = options.with_title(title.clone());
        }
        if self.all_nested_lists {
            options = options.with_nested_lists(NestedLists::All);
        }
        if self.no_default_denylist {
            options = options.with_filters(Vec::new());
        }
        for selector in &self.remove {
            options = options.with_filter(Filter::parse(selector)?);
        }

        Ok(options)
    }

    fn reads_stdin(&self) -> bool {
        self.input
            .as_ref()
            .map_or(true, |path| path.as_os_str() == "-")
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(args: &Args) -> Result<String, CliError> {
    match &args.input {
        Some(path) if !args.reads_stdin() => {
            fs::read_to_string(path).map_err(|e| CliError::io(path, e))
        }
        _ => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .map_err(|e| CliError::io("<stdin>", e))?;
            Ok(html)
        }
    }
}

fn write_output(args: &Args, markdown: &str) -> Result<(), CliError> {
    match &args.output {
        Some(path) => {
            let mut contents = markdown.to_string();
            contents.push('\n');
            fs::write(path, contents).map_err(|e| CliError::io(path, e))
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{markdown}").map_err(|e| CliError::io("<stdout>", e))
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let converter = Converter::with_options(args.convert_options()?);
    let html = read_input(args)?;
    tracing::info!(bytes = html.len(), "read input");

    let markdown = converter.convert_html(&html)?;
    write_output(args, &markdown)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("confmark").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert!(args.reads_stdin());
        let options = args.convert_options().unwrap();
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(options.nested_lists, NestedLists::FirstOnly);
        assert!(options.sanitize);
        assert!(options.title.is_none());
        assert!(!options.remove.is_empty());
    }

    #[test]
    fn test_dash_reads_stdin() {
        assert!(parse(&["-"]).reads_stdin());
        assert!(!parse(&["page.html"]).reads_stdin());
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = parse(&[
            "--title",
            "Page",
            "--max-depth",
            "64",
            "--all-nested-lists",
            "--no-default-denylist",
            "--remove",
            ".toc",
            "--remove",
            "aside",
        ]);
        let options = args.convert_options().unwrap();
        assert_eq!(options.title.as_deref(), Some("Page"));
        assert_eq!(options.max_depth, 64);
        assert_eq!(options.nested_lists, NestedLists::All);
        assert_eq!(options.remove.len(), 2);
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let args = parse(&["--remove", "div > p"]);
        let err = args.convert_options().unwrap_err();
        assert!(matches!(err, CliError::Convert(_)));
        assert!(err.to_string().contains("div > p"));
    }

    #[test]
    fn test_verbose_counts() {
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }
}
