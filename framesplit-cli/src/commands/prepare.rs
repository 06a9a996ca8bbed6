//! Implementation of the dataset preparation run.
//!
//! This module turns the parsed arguments into a core configuration, runs the
//! dataset build with the ffmpeg/ffprobe adapters, exports the sanitized
//! archive and reports a final summary.

use crate::cli::Cli;
use crate::config::REQUIRED_TOOLS;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal;

use framesplit_core::external::{DecodeImageValidator, FfmpegFrameExtractor, FfprobeProber};
use framesplit_core::{
    ArchiveReport, CoreConfig, RunSummary, check_dependency, export_sanitized_archive,
    format_duration, format_elapsed_minutes, get_filename_safe, process_dataset, write_summary_json,
};

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, error, warn};

/// Builds the core configuration from the command-line arguments.
pub fn build_config(args: &Cli) -> CoreConfig {
    let mut config = CoreConfig::new(args.root.clone());
    config.inventory_name = args.csv.clone();
    config.rename_images = args.change_names;
    config.export_archive = !args.no_archive;
    config.archive_path = args.archive.clone();
    config
}

/// Warns about missing ffmpeg/ffprobe. Image-only datasets need neither, so
/// a missing tool never stops the run.
fn warn_missing_tools() {
    for tool in REQUIRED_TOOLS {
        if let Err(e) = check_dependency(tool) {
            warn!("{e}; frames cannot be extracted from videos");
            terminal::print_warning(&format!("{tool} unavailable, video frames will fail"));
        }
    }
}

/// Exports the archive, reporting but not propagating a failure.
fn export_archive(root: &Path, archive_path: &Path) -> Option<ArchiveReport> {
    terminal::print_section("Archive");
    match export_sanitized_archive(root, archive_path) {
        Ok(report) => {
            let name = get_filename_safe(&report.archive_path)
                .unwrap_or_else(|_| report.archive_path.display().to_string());
            terminal::print_success(&format!("Archive {name} written"));
            terminal::print_status("Files", &report.files_archived.to_string(), false);
            terminal::print_status("Videos removed", &report.videos_stripped.to_string(), false);
            Some(report)
        }
        Err(e) => {
            error!("Archive export to {} failed: {}", archive_path.display(), e);
            terminal::print_warning("Archive export failed; the inventory is unaffected");
            None
        }
    }
}

/// Reports images deleted as corrupt, whether or not the build succeeded.
fn print_corrupted(corrupted: &[PathBuf]) {
    terminal::print_status("Corrupted", &corrupted.len().to_string(), false);
    if !corrupted.is_empty() {
        terminal::print_file_list("Removed corrupted images:", corrupted);
    }
}

fn print_summary(summary: &RunSummary) {
    terminal::print_section("Summary");
    terminal::print_status(
        "Elapsed",
        &format!(
            "{} ({})",
            format_elapsed_minutes(summary.elapsed()),
            format_duration(summary.elapsed_seconds)
        ),
        false,
    );
    terminal::print_status("Categories", &summary.categories.to_string(), false);
    terminal::print_status("Videos", &summary.videos.to_string(), false);
    terminal::print_status("Images", &summary.images.to_string(), false);
    terminal::print_status(
        "Frames",
        &format!("{} extracted, {} failed", summary.frames_extracted, summary.frames_failed),
        summary.frames_failed > 0,
    );
    terminal::print_status("Rows written", &summary.rows_written.to_string(), true);
    print_corrupted(&summary.corrupted_images);
    if let Some(path) = &summary.inventory_path {
        terminal::print_status("Inventory", &path.display().to_string(), false);
    }
    if let Some(path) = &summary.archive_path {
        terminal::print_status("Archive", &path.display().to_string(), false);
    }
}

/// Runs one full preparation of the dataset described by `args`.
pub fn run_prepare(args: &Cli) -> CliResult<RunSummary> {
    let started_at = chrono::Local::now();
    let start = Instant::now();

    let config = build_config(args);
    config.validate()?;
    debug!("Configuration: {:?}", config);

    terminal::print_section("Framesplit");
    terminal::print_status("Root", &config.root.display().to_string(), true);
    terminal::print_status("Inventory", &config.inventory_name, false);
    terminal::print_status("Rename images", &config.rename_images.to_string(), false);
    let archive_path = config.resolved_archive_path();
    if config.export_archive {
        terminal::print_status("Archive", &archive_path.display().to_string(), false);
    } else {
        terminal::print_status("Archive", "disabled", false);
    }

    if config.root.is_dir() {
        warn_missing_tools();
    }

    terminal::print_section("Build");
    let extractor = FfmpegFrameExtractor::new(config.jpeg_quality);
    let report = match process_dataset(&config, &FfprobeProber, &extractor, &DecodeImageValidator) {
        Ok(report) => report,
        Err(e) => {
            print_corrupted(e.corrupted_images());
            return Err(e);
        }
    };
    terminal::print_success(&format!(
        "Inventory written with {} rows",
        report.rows.len()
    ));

    let archive = if config.export_archive {
        export_archive(&config.root, &archive_path)
    } else {
        None
    };

    let summary = RunSummary::from_report(started_at, start.elapsed(), &report, archive.as_ref());
    print_summary(&summary);

    if let Some(path) = &args.summary_json {
        write_summary_json(&summary, path)
            .cli_with_context(|| format!("Failed to write run summary to {}", path.display()))?;
    }

    Ok(summary)
}
