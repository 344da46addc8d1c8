//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// Remove page-builder shortcodes from every document in a directory,
/// keeping the content they wrap.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory of documents to clean (overrides `documents_path` in the config file)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub documents_path: Option<PathBuf>,

    /// Config file path (default: ~/.config/shortcode-stripper/config.toml)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Shortcode name to strip; repeat to strip several (replaces the configured list)
    #[arg(short, long = "marker", value_name = "NAME")]
    pub markers: Vec<String>,

    /// Glob selecting document files, relative to the documents directory (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Report what would change without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Confirm rewriting documents in place. This cannot be undone.
    #[arg(short, long)]
    pub yes: bool,

    /// Print the effective marker list and exit
    #[arg(long)]
    pub list_markers: bool,

    /// Write a TOML summary of the run to this file
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub report: Option<PathBuf>,
}
