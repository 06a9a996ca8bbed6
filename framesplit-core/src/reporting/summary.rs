//! Run summary
//!
//! A `RunSummary` captures what one pipeline run produced: counters from the
//! build report, the corrupted images that were purged, and where the
//! inventory and archive ended up.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::archive::ArchiveReport;
use crate::error::CoreResult;
use crate::processing::BuildReport;

/// Summary of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Local time the run started
    pub started_at: DateTime<Local>,

    /// Wall time of the whole run in seconds
    pub elapsed_seconds: f64,

    pub categories: usize,
    pub videos: usize,
    pub images: usize,

    /// Rows written to the inventory
    pub rows_written: usize,

    pub frames_extracted: usize,
    pub frames_failed: usize,

    /// Videos sampled at 0.0s because probing failed
    pub probe_failures: usize,

    /// Images deleted because they failed to decode
    pub corrupted_images: Vec<PathBuf>,

    pub inventory_path: Option<PathBuf>,

    /// Set only when the archive export succeeded
    pub archive_path: Option<PathBuf>,

    /// Video files left out of the archive
    pub videos_stripped: usize,
}

impl RunSummary {
    /// Builds a summary from a build report and an optional archive report.
    #[must_use]
    pub fn from_report(
        started_at: DateTime<Local>,
        elapsed: Duration,
        report: &BuildReport,
        archive: Option<&ArchiveReport>,
    ) -> Self {
        Self {
            started_at,
            elapsed_seconds: elapsed.as_secs_f64(),
            categories: report.categories,
            videos: report.videos,
            images: report.images,
            rows_written: report.rows.len(),
            frames_extracted: report.frames_extracted,
            frames_failed: report.frames_failed,
            probe_failures: report.probe_failures,
            corrupted_images: report.corrupted_images.clone(),
            inventory_path: report.inventory_path.clone(),
            archive_path: archive.map(|a| a.archive_path.clone()),
            videos_stripped: archive.map_or(0, |a| a.videos_stripped),
        }
    }

    /// Elapsed wall time as a `Duration`.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_seconds.max(0.0))
    }
}

/// Writes `summary` as pretty-printed JSON to `path`.
pub fn write_summary_json(summary: &RunSummary, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    log::debug!("Run summary written to {}", path.display());
    Ok(())
}
