//! Terminal output for the CLI.
//!
//! Everything goes through the `log` facade at info level so it is mirrored
//! into the run log file when one is configured. Errors are written straight
//! to stderr so they appear even when logging is filtered out.

use console::style;
use log::info;
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Check if color should be used (respects NO_COLOR environment variable)
pub fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", title.to_uppercase().cyan());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Spaces between a status label and its value, at least one.
fn label_padding(label: &str) -> usize {
    let label_width: usize = 15;
    label_width.saturating_sub(label.chars().count()).max(1)
}

/// Print a status line (key-value pair)
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let padding = label_padding(label);
    let value = if should_use_color() && highlight {
        style(value).bold().to_string()
    } else {
        value.to_string()
    };
    info!("  {}:{}{}", label, " ".repeat(padding), value);
}

pub fn print_success(message: &str) {
    if should_use_color() {
        info!("  ✓ {}", message.green());
    } else {
        info!("  ✓ {message}");
    }
}

pub fn print_warning(message: &str) {
    if should_use_color() {
        info!("  ! {}", message.yellow());
    } else {
        info!("  ! {message}");
    }
}

/// Print an indented list of paths under a header.
pub fn print_file_list(header: &str, files: &[PathBuf]) {
    info!("  {header}");
    for file in files {
        info!("    - {}", file.display());
    }
}

/// Print an error message with an optional suggestion.
pub fn print_error(title: &str, message: &str, suggestion: Option<&str>) {
    if should_use_color() {
        eprintln!("✗ {}", title.red().bold());
    } else {
        eprintln!("✗ {title}");
    }
    eprintln!("  {message}");
    if let Some(hint) = suggestion {
        eprintln!("  {hint}");
    }
}
