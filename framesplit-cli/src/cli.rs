// framesplit-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use crate::config::{DEFAULT_CSV_NAME, DEFAULT_ROOT};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Framesplit: dataset preparation for image classifiers",
    long_about = "Samples frames from per-category videos, assigns videos and images to \
                  train/val/test splits, writes an inventory CSV and exports a video-free zip."
)]
pub struct Cli {
    /// Dataset root containing one directory per category
    #[arg(long, value_name = "DIR", env = "FRAMESPLIT_ROOT", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Name of the inventory file written inside the root
    #[arg(long = "csv", value_name = "NAME", default_value = DEFAULT_CSV_NAME)]
    pub csv: String,

    /// Rename images to <category><n>_<counter>.<ext> before building.
    /// Accepts true/false/1/0/yes/no/on/off; the bare flag means true.
    #[arg(
        long = "change_names",
        value_name = "BOOL",
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_bool_like,
        action = ArgAction::Set
    )]
    pub change_names: bool,

    /// Skip the sanitized archive export
    #[arg(long)]
    pub no_archive: bool,

    /// Optional: Archive destination (defaults to <root-parent>/<root-name>_.zip)
    #[arg(long, value_name = "PATH", conflicts_with = "no_archive")]
    pub archive: Option<PathBuf>,

    /// Optional: Write the run summary as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Optional: Directory for a run log file (console output is mirrored into it)
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses a boolean-like flag value, case-insensitively.
pub fn parse_bool_like(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "0" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected a boolean (true/false/1/0/yes/no/on/off), got '{other}'")),
    }
}
