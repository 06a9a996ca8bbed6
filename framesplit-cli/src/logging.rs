// ============================================================================
// framesplit-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and Optional File Logging
//
// Console logging uses `env_logger` and honors RUST_LOG (default: info).
// With `--log-dir`, log4rs is configured instead so every console line is
// also written to `framesplit_run_<timestamp>.log` in that directory.
//
// USAGE:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug or --verbose: ffmpeg command lines and per-file detail

use crate::error::{CliErrorContext, CliResult};
use framesplit_core::CoreError;
use framesplit_core::file_logging::{log_file_name, setup_file_logging};

use log::LevelFilter;
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let log_filename = format!("framesplit_run_{}.log", framesplit_cli::logging::get_timestamp());
/// assert!(log_filename.len() > "framesplit_run_.log".len());
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn init_console_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    let use_color = crate::terminal::should_use_color();
    builder
        .format(move |buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => {
                let tag = format!("{level:<5}");
                let tag = match level {
                    _ if !use_color => tag,
                    log::Level::Error => tag.red().bold().to_string(),
                    log::Level::Warn => tag.yellow().to_string(),
                    _ => tag.blue().to_string(),
                };
                writeln!(buf, "{tag} {}", record.args())
            }
        })
        .init();
}

/// Initializes logging and returns the run log file, if one was requested.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let Some(dir) = log_dir else {
        init_console_logging(verbose);
        return Ok(None);
    };

    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let log_path = dir.join(log_file_name(&get_timestamp()));
    setup_file_logging(&log_path, level)
        .map_err(|e| CoreError::OperationFailed(e.to_string()))
        .cli_context(format!("Failed to set up logging in {}", dir.display()))?;
    Ok(Some(log_path))
}
