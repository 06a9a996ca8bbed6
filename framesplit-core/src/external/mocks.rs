// framesplit-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled only with the "test-mocks" feature.

use super::{FrameExtractor, ImageValidator, MediaProber};
use crate::error::{CoreError, CoreResult};

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One recorded `extract_frame` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionCall {
    pub video: PathBuf,
    pub timestamp: f64,
    pub output: PathBuf,
}

/// Scripted prober and extractor.
///
/// Durations are looked up by video path; unknown paths fail to probe.
/// Extraction succeeds (writing a small placeholder file) unless the video
/// or the exact output path was registered as failing.
#[derive(Clone, Default)]
pub struct MockMediaTools {
    durations: Rc<RefCell<HashMap<PathBuf, f64>>>,
    failing_videos: Rc<RefCell<HashSet<PathBuf>>>,
    failing_outputs: Rc<RefCell<HashSet<PathBuf>>>,
    probe_calls: Rc<RefCell<Vec<PathBuf>>>,
    extraction_calls: Rc<RefCell<Vec<ExtractionCall>>>,
}

impl MockMediaTools {
    pub fn new() -> Self {
        Default::default()
    }

    /// Scripts the duration reported for `video`.
    pub fn expect_duration(&self, video: &Path, seconds: f64) {
        self.durations
            .borrow_mut()
            .insert(video.to_path_buf(), seconds);
    }

    /// Makes every extraction from `video` fail.
    pub fn fail_extraction_for(&self, video: &Path) {
        self.failing_videos.borrow_mut().insert(video.to_path_buf());
    }

    /// Makes the extraction writing exactly `output` fail.
    pub fn fail_output(&self, output: &Path) {
        self.failing_outputs
            .borrow_mut()
            .insert(output.to_path_buf());
    }

    pub fn probe_calls(&self) -> Vec<PathBuf> {
        self.probe_calls.borrow().clone()
    }

    pub fn extraction_calls(&self) -> Vec<ExtractionCall> {
        self.extraction_calls.borrow().clone()
    }
}

impl MediaProber for MockMediaTools {
    fn probe_duration(&self, video: &Path) -> CoreResult<f64> {
        log::info!("MockMediaTools::probe_duration called for: {}", video.display());
        self.probe_calls.borrow_mut().push(video.to_path_buf());
        self.durations.borrow().get(video).copied().ok_or_else(|| {
            CoreError::FfprobeParse(format!(
                "MockMediaTools: No duration scripted for {}",
                video.display()
            ))
        })
    }
}

impl FrameExtractor for MockMediaTools {
    fn extract_frame(&self, video: &Path, timestamp: f64, output: &Path) -> CoreResult<()> {
        self.extraction_calls.borrow_mut().push(ExtractionCall {
            video: video.to_path_buf(),
            timestamp,
            output: output.to_path_buf(),
        });

        if self.failing_videos.borrow().contains(video)
            || self.failing_outputs.borrow().contains(output)
        {
            log::warn!("MockMediaTools simulating extraction failure for {}", output.display());
            return Err(CoreError::PathError(format!(
                "Mock extraction failure for {}",
                output.display()
            )));
        }

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output, format!("frame of {} at {timestamp:.3}", video.display()))?;
        Ok(())
    }
}

/// Validator that rejects a fixed set of paths (matched by file name).
#[derive(Clone, Default)]
pub struct MockImageValidator {
    corrupt_names: Rc<RefCell<HashSet<String>>>,
    checked: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockImageValidator {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reports any image named `file_name` as undecodable.
    pub fn mark_corrupt(&self, file_name: &str) {
        self.corrupt_names
            .borrow_mut()
            .insert(file_name.to_string());
    }

    pub fn checked_paths(&self) -> Vec<PathBuf> {
        self.checked.borrow().clone()
    }
}

impl ImageValidator for MockImageValidator {
    fn is_decodable(&self, image: &Path) -> bool {
        self.checked.borrow_mut().push(image.to_path_buf());
        let name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        !self.corrupt_names.borrow().contains(&name)
    }
}
