//! testdox CLI - render readable specifications from JUnit-style test sources

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use testdox_core::config::{self, ResolvedConfig};
use testdox_core::{
    render_document, render_json, EntryCollector, HtmlSink, MarkdownSink, ReportSummary,
    SourceTree, TextSink,
};

/// Where the HTML report lands when no output path is configured
const DEFAULT_HTML_OUTPUT: &str = "target/site/testdox.html";

#[derive(Parser)]
#[command(name = "testdox")]
#[command(about = "Turn JUnit-style test names into a readable specification")]
#[command(version = env!("TESTDOX_VERSION"))]
struct Cli {
    /// Log progress to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a report for a project, directory or single source file
    Report {
        /// Project root, source directory or Java file
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "html")]
        format: OutputFormat,

        /// Output file path (for HTML format, default: target/site/testdox.html)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Report title (overrides config file)
        #[arg(long)]
        title: Option<String>,

        /// Omit test classes that have no test methods
        #[arg(long)]
        skip_empty: bool,
    },
    /// Validate or inspect a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without rendering a report
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    Html,
    Markdown,
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Report {
            path,
            format,
            output,
            config: config_path,
            title,
            skip_empty,
        } => {
            // Normalize path to absolute
            let normalized_path = if path.is_relative() {
                std::env::current_dir()?.join(&path)
            } else {
                path
            };

            if !normalized_path.exists() {
                anyhow::bail!("Path does not exist: {}", normalized_path.display());
            }

            let project_root = project_root(&normalized_path)?;
            let mut resolved_config =
                config::load_and_resolve(&project_root, config_path.as_deref())
                    .context("failed to load configuration")?;

            if let Some(config_path) = &resolved_config.config_path {
                tracing::info!("Using config: {}", config_path.display());
            }

            apply_overrides(&mut resolved_config, title, skip_empty);

            let rendered = render(&normalized_path, format, &resolved_config)?;

            match output_path(output, &resolved_config, format, &project_root) {
                Some(output_path) => {
                    write_report_file(&output_path, &rendered)?;
                    eprintln!("Report written to: {}", output_path.display());
                }
                None => print!("{}", rendered),
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;
                print_config(&resolved);
            }
        },
    }

    Ok(())
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise warnings only, or info with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// CLI flags override config file values
fn apply_overrides(config: &mut ResolvedConfig, title: Option<String>, skip_empty: bool) {
    if let Some(title) = title {
        config.title = title;
    }
    if skip_empty {
        config.emit_empty_sections = false;
    }
}

/// Where the rendered report goes, or `None` for stdout
///
/// `--output` wins over the config file's `output`; only HTML falls back to
/// a default file. Relative paths are taken from the project root.
fn output_path(
    cli_output: Option<PathBuf>,
    config: &ResolvedConfig,
    format: OutputFormat,
    project_root: &Path,
) -> Option<PathBuf> {
    cli_output
        .or_else(|| config.output.clone())
        .or_else(|| (format == OutputFormat::Html).then(|| PathBuf::from(DEFAULT_HTML_OUTPUT)))
        .map(|p| if p.is_relative() { project_root.join(p) } else { p })
}

/// Parse every test source below `path` and render it in `format`
fn render(path: &Path, format: OutputFormat, config: &ResolvedConfig) -> anyhow::Result<String> {
    let source_root = config.test_source_root(path);
    tracing::info!("Processing test classes from: {}", source_root.display());

    // Walk once: the same list sizes the progress bar and gets parsed
    let tree = SourceTree::new(&source_root).with_config(config);
    let files = tree.files()?;
    let progress = progress_bar(files.len() as u64);
    let on_file = |file: &Path| {
        tracing::debug!("Processing test class: {}", file.display());
        progress.inc(1);
    };
    let units = tree
        .with_progress(&on_file)
        .parse_files(files)
        .context("failed to parse test sources")?;
    progress.finish_and_clear();

    let options = config.report_options();
    let (rendered, summary) = match format {
        OutputFormat::Html => {
            let mut sink = HtmlSink::new();
            let summary = render_document(&units, &mut sink, &options);
            (sink.finish(), summary)
        }
        OutputFormat::Markdown => {
            let mut sink = MarkdownSink::new();
            let summary = render_document(&units, &mut sink, &options);
            (sink.finish(), summary)
        }
        OutputFormat::Text => {
            let mut sink = TextSink::new();
            let summary = render_document(&units, &mut sink, &options);
            (sink.finish(), summary)
        }
        OutputFormat::Json => {
            let mut sink = EntryCollector::new();
            let summary = render_document(&units, &mut sink, &options);
            (format!("{}\n", render_json(&sink.into_entries())), summary)
        }
    };
    log_summary(&summary);

    Ok(rendered)
}

fn log_summary(summary: &ReportSummary) {
    tracing::info!(
        "Reported {} test method(s) in {} test class(es)",
        summary.test_methods,
        summary.test_classes
    );
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message("Parsing test sources");
    bar
}

/// Directory used for config discovery and relative output paths
fn project_root(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_file() {
        path.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow::anyhow!("invalid file path"))
    } else {
        Ok(path.to_path_buf())
    }
}

fn print_config(resolved: &ResolvedConfig) {
    println!("Configuration:");
    if let Some(ref p) = resolved.config_path {
        println!("  Source: {}", p.display());
    } else {
        println!("  Source: defaults (no config file found)");
    }
    println!();
    println!("Report:");
    println!("  title: {}", resolved.title);
    println!("  empty sections: {}", resolved.emit_empty_sections);
    match resolved.output {
        Some(ref output) => println!("  output: {}", output.display()),
        None => println!("  output: {} (html only)", DEFAULT_HTML_OUTPUT),
    }
    println!();
    println!("Sources:");
    println!("  test source dir: {}", resolved.test_source_dir.display());
    println!(
        "  include: {}",
        if resolved.include.is_some() {
            "custom patterns"
        } else {
            "all files"
        }
    );
}

/// Write a report to file with atomic write pattern
fn write_report_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    use std::fs;

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut temp_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("invalid output path: {}", path.display()))?
        .to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write temporary file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}
