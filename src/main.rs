//! domdiff command-line interface.
//!
//! Loads a base tree and a new tree, diffs them, and prints either a change
//! summary or the annotated tree for a selective serializer.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use domdiff_rs::{
    format_result, logging, parse_file, parse_stdin, DiffConfig, DomDiff, FormatHint, Node,
    OutputFormat, OutputOptions, PolicyFile,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

/// domdiff - structural diff for document trees
///
/// Compares two trees (JSON, YAML or TOML) and marks what changed in a copy of
/// the new one. Pass `-` as a path to read that tree from stdin.
#[derive(Parser)]
#[command(name = "domdiff")]
#[command(version)]
#[command(about = "Structural diff for document trees", long_about = None)]
struct Cli {
    /// Base (reference) tree
    #[arg(value_name = "BASE")]
    base: PathBuf,

    /// New tree to annotate
    #[arg(value_name = "NEW")]
    new: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// TOML policy file overriding the ignore-list and classifiers
    #[arg(long, value_name = "FILE")]
    policy: Option<PathBuf>,

    /// Additional attribute to ignore when comparing (repeatable)
    #[arg(long = "ignore-attr", value_name = "NAME")]
    ignore_attrs: Vec<String>,

    /// Append the annotated markup to the change list
    #[arg(long)]
    show_tree: bool,

    /// Maximum length for node previews
    #[arg(long, default_value = "60")]
    max_value_length: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (only show changes, suppress summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored change list
    Terminal,
    /// Change list without colors
    Plain,
    /// JSON with changes, stats and the annotated tree
    Json,
    /// Annotated tree as markup
    Markup,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Plain => OutputFormat::Plain,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Markup => OutputFormat::Markup,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn load_tree(path: &Path) -> Result<Node> {
    let node = if path == Path::new("-") {
        parse_stdin(FormatHint::Auto)?
    } else {
        parse_file(path)?
    };
    Ok(node)
}

fn build_config(cli: &Cli) -> Result<DiffConfig> {
    let mut config = match &cli.policy {
        Some(path) => PolicyFile::load(path)
            .and_then(PolicyFile::into_config)
            .with_context(|| format!("Failed to load policy: {}", path.display()))?,
        None => DiffConfig::default(),
    };
    for name in &cli.ignore_attrs {
        config = config.ignore_attribute(name.clone());
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    if cli.base == Path::new("-") && cli.new == Path::new("-") {
        anyhow::bail!("Only one of BASE and NEW can be read from stdin");
    }

    let config = build_config(&cli)?;

    info!(path = %cli.base.display(), "parsing base tree");
    let base = load_tree(&cli.base)
        .with_context(|| format!("Failed to parse base tree: {}", cli.base.display()))?;

    info!(path = %cli.new.display(), "parsing new tree");
    let new = load_tree(&cli.new)
        .with_context(|| format!("Failed to parse new tree: {}", cli.new.display()))?;

    let result = DomDiff::new(config)
        .diff(&base, &new)
        .context("Failed to diff trees")?;

    let output_options = OutputOptions {
        show_tree: cli.show_tree,
        max_value_length: cli.max_value_length,
    };

    let output_format: OutputFormat = cli.format.into();
    let output = format_result(&result, &output_format, &output_options)
        .context("Failed to format diff output")?;

    if !cli.quiet {
        println!("{}", output);
    } else {
        for line in output.lines() {
            if !line.starts_with("Summary:") && !line.trim().is_empty() {
                println!("{}", line);
            }
        }
    }

    Ok(if result.is_changed { 1 } else { 0 })
}
