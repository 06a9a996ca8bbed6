// ============================================================================
// framesplit-core/src/processing/dataset.rs
// ============================================================================
//
// DATASET BUILD: Applying Category Plans
//
// Applying a plan tears down the category's frames directory, regenerates it
// from the plan, and turns every frame job and image entry into an inventory
// row. Extraction failures never stop the build: the row is still emitted,
// with an empty output path.

use crate::error::CoreResult;
use crate::external::FrameExtractor;
use crate::inventory::{InventoryRow, SourceType, encode_timestamp};
use crate::processing::plan::CategoryPlan;

use std::path::Path;

/// Rows and extraction counts produced by applying one plan.
#[derive(Debug, Clone, Default)]
pub struct CategoryOutcome {
    pub rows: Vec<InventoryRow>,
    pub frames_extracted: usize,
    pub frames_failed: usize,
}

/// Deletes `frames_dir` if present, recreating it when `recreate` is set.
///
/// Anything under `frames_dir` is lost; it is always derived output.
pub fn reset_frames_dir(frames_dir: &Path, recreate: bool) -> CoreResult<()> {
    if frames_dir.is_dir() {
        log::debug!("Removing previous frames: {}", frames_dir.display());
        std::fs::remove_dir_all(frames_dir)?;
    }
    if recreate {
        std::fs::create_dir_all(frames_dir)?;
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Applies `plan`, extracting its frames and emitting its inventory rows.
///
/// `absolute_root` is the canonical dataset root used for `output_path`.
pub fn apply_category_plan<E: FrameExtractor>(
    plan: &CategoryPlan,
    extractor: &E,
    absolute_root: &Path,
) -> CoreResult<CategoryOutcome> {
    reset_frames_dir(&plan.frames_dir, !plan.frame_jobs.is_empty())?;

    let mut outcome = CategoryOutcome {
        rows: Vec::with_capacity(plan.frame_jobs.len() + plan.images.len()),
        ..Default::default()
    };

    for job in &plan.frame_jobs {
        if let Some(split_dir) = job.output.parent() {
            std::fs::create_dir_all(split_dir)?;
        }

        let output_path = match extractor.extract_frame(&job.video, job.timestamp, &job.output) {
            Ok(()) => {
                outcome.frames_extracted += 1;
                log::info!(
                    "    - {}: {}  (t={:.3}s)",
                    job.split,
                    display_name(&job.output),
                    job.timestamp
                );
                absolute_root.join(&job.relative_path).to_string_lossy().into_owned()
            }
            Err(e) => {
                outcome.frames_failed += 1;
                log::warn!(
                    "    !! failed extracting t={:.3}s from {}: {}",
                    job.timestamp,
                    display_name(&job.video),
                    e
                );
                String::new()
            }
        };

        outcome.rows.push(InventoryRow {
            category: plan.category.clone(),
            source_type: SourceType::Video,
            filename: display_name(&job.video),
            timestamps_extracted: encode_timestamp(job.timestamp)?,
            output_path,
            relative_path: job.relative_path.to_string_lossy().into_owned(),
            split: job.split,
        });
    }

    for image in &plan.images {
        outcome.rows.push(InventoryRow {
            category: plan.category.clone(),
            source_type: SourceType::Image,
            filename: display_name(&image.path),
            timestamps_extracted: String::new(),
            output_path: absolute_root
                .join(&image.relative_path)
                .to_string_lossy()
                .into_owned(),
            relative_path: image.relative_path.to_string_lossy().into_owned(),
            split: image.split,
        });
    }

    Ok(outcome)
}
