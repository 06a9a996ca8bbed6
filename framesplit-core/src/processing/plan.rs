// ============================================================================
// framesplit-core/src/processing/plan.rs
// ============================================================================
//
// BUILD PLANNING: Target State of One Category
//
// A category plan records everything a build will do to a category before any
// file is touched: the split of every video and image, the probed durations,
// the chosen timestamps, and the path of every frame. Only probing runs here.

use crate::config::{CoreConfig, FRAMES_DIR_NAME};
use crate::discovery::CategoryContents;
use crate::external::MediaProber;
use crate::sampling::choose_timestamps;
use crate::splits::{Split, partition};

use std::path::{Path, PathBuf};

/// One frame to extract.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameJob {
    pub video: PathBuf,
    pub split: Split,
    /// 1-based position of the timestamp within the video's samples
    pub ordinal: usize,
    pub timestamp: f64,
    /// Where the frame is written
    pub output: PathBuf,
    /// `output` relative to the dataset root
    pub relative_path: PathBuf,
}

/// One image kept in place and assigned to a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub split: Split,
    pub relative_path: PathBuf,
}

/// Target state of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPlan {
    pub category: String,
    pub frames_dir: PathBuf,
    /// Frame jobs, by split then by video, three per video
    pub frame_jobs: Vec<FrameJob>,
    /// Images, by split
    pub images: Vec<ImageEntry>,
    /// Videos whose duration could not be probed
    pub probe_failures: usize,
}

impl CategoryPlan {
    /// Number of videos the plan samples from.
    #[must_use]
    pub fn video_count(&self) -> usize {
        self.frame_jobs.len() / crate::config::FRAMES_PER_VIDEO
    }
}

/// `frame_<stem>_<ordinal>.jpg` with a six-digit ordinal.
#[must_use]
pub fn frame_file_name(video_stem: &str, ordinal: usize) -> String {
    format!("frame_{video_stem}_{ordinal:06}.jpg")
}

fn file_stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Probes a duration, treating any failure as a zero-length clip.
fn probe_or_zero<P: MediaProber>(prober: &P, video: &Path) -> (f64, bool) {
    match prober.probe_duration(video) {
        Ok(duration) => (duration, true),
        Err(e) => {
            log::warn!(
                "Could not probe duration of {}, sampling at 0.0s: {}",
                video.display(),
                e
            );
            (0.0, false)
        }
    }
}

/// Plans the frames and image assignments for one category.
pub fn plan_category<P: MediaProber>(
    category: &CategoryContents,
    prober: &P,
    config: &CoreConfig,
) -> CategoryPlan {
    let frames_dir = category.path.join(FRAMES_DIR_NAME);
    let relative_frames = Path::new(&category.name).join(FRAMES_DIR_NAME);

    let video_parts = partition(&category.videos, &config.split_ratios, config.split_seed);
    let mut frame_jobs = Vec::with_capacity(video_parts.len() * crate::config::FRAMES_PER_VIDEO);
    let mut probe_failures = 0;

    for (split, video) in video_parts.iter() {
        let (duration, probed) = probe_or_zero(prober, video);
        if !probed {
            probe_failures += 1;
        }
        let timestamps = choose_timestamps(duration);
        log::info!(
            "  Video {} (dur={:.2}s) -> {} timestamps: {:?}",
            file_name_of(video),
            duration,
            split,
            timestamps
        );

        let stem = file_stem_of(video);
        for (idx, timestamp) in timestamps.into_iter().enumerate() {
            let name = frame_file_name(&stem, idx + 1);
            frame_jobs.push(FrameJob {
                video: video.clone(),
                split,
                ordinal: idx + 1,
                timestamp,
                output: frames_dir.join(split.as_str()).join(&name),
                relative_path: relative_frames.join(split.as_str()).join(&name),
            });
        }
    }

    let images = partition(&category.images, &config.split_ratios, config.split_seed)
        .iter()
        .map(|(split, path)| ImageEntry {
            path: path.clone(),
            split,
            relative_path: Path::new(&category.name).join(file_name_of(path)),
        })
        .collect();

    CategoryPlan {
        category: category.name.clone(),
        frames_dir,
        frame_jobs,
        images,
        probe_failures,
    }
}
