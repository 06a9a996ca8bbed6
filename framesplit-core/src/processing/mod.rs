//! Dataset build orchestration.
//!
//! `build_dataset` scans the root, plans every category and applies the plans
//! in scan order. `process_dataset` wraps it with configuration checks and
//! writes the inventory.

pub mod dataset;
pub mod plan;

pub use dataset::{CategoryOutcome, apply_category_plan, reset_frames_dir};
pub use plan::{CategoryPlan, FrameJob, ImageEntry, frame_file_name, plan_category};

use crate::config::{CoreConfig, FRAMES_PER_VIDEO};
use crate::discovery::scan_categories;
use crate::error::{CoreError, CoreResult};
use crate::external::{FrameExtractor, ImageValidator, MediaProber};
use crate::inventory::{InventoryRow, write_inventory};

use std::path::{Path, PathBuf};

/// Result of a dataset build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Inventory rows in emission order
    pub rows: Vec<InventoryRow>,
    /// Images removed because they failed to decode
    pub corrupted_images: Vec<PathBuf>,
    pub categories: usize,
    pub videos: usize,
    pub images: usize,
    pub frames_extracted: usize,
    pub frames_failed: usize,
    pub probe_failures: usize,
    /// Set once the inventory has been written
    pub inventory_path: Option<PathBuf>,
}

fn check_root(root: &Path) -> CoreResult<()> {
    if !root.exists() {
        return Err(CoreError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(CoreError::RootNotDirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Scans `config.root` and regenerates every category's frames.
///
/// # Errors
///
/// Fails on a missing or non-directory root, when no category has any video
/// or valid image, and on I/O errors against the dataset tree. Probe and
/// extraction failures of single items are recovered and counted instead.
pub fn build_dataset<P, E, V>(
    config: &CoreConfig,
    prober: &P,
    extractor: &E,
    validator: &V,
) -> CoreResult<BuildReport>
where
    P: MediaProber,
    E: FrameExtractor,
    V: ImageValidator,
{
    check_root(&config.root)?;
    let scan = scan_categories(&config.root, config.rename_images, validator)?;
    if scan.categories.is_empty() {
        return Err(CoreError::NoCategoriesFound {
            root: config.root.clone(),
            corrupted_images: scan.corrupted_images,
        });
    }

    let absolute_root = config.root.canonicalize()?;
    let mut report = BuildReport {
        corrupted_images: scan.corrupted_images,
        categories: scan.categories.len(),
        ..Default::default()
    };

    for category in &scan.categories {
        if category.videos.is_empty() {
            log::info!(
                "Category '{}': {} videos, {} images -> no frames directory (no videos)",
                category.name,
                category.videos.len(),
                category.images.len()
            );
        } else {
            log::info!(
                "Category '{}': {} videos, {} images -> frames in {}",
                category.name,
                category.videos.len(),
                category.images.len(),
                category.path.join(crate::config::FRAMES_DIR_NAME).display()
            );
        }

        let plan = plan_category(category, prober, config);
        let outcome = apply_category_plan(&plan, extractor, &absolute_root)?;

        report.videos += category.videos.len();
        report.images += category.images.len();
        report.probe_failures += plan.probe_failures;
        report.frames_extracted += outcome.frames_extracted;
        report.frames_failed += outcome.frames_failed;
        report.rows.extend(outcome.rows);
    }

    debug_assert_eq!(
        report.rows.len(),
        FRAMES_PER_VIDEO * report.videos + report.images
    );
    Ok(report)
}

/// Validates the configuration, builds the dataset and writes the inventory to
/// `<root>/<inventory_name>`.
///
/// A previous inventory is removed before scanning, so a failed run never
/// leaves a stale one behind.
pub fn process_dataset<P, E, V>(
    config: &CoreConfig,
    prober: &P,
    extractor: &E,
    validator: &V,
) -> CoreResult<BuildReport>
where
    P: MediaProber,
    E: FrameExtractor,
    V: ImageValidator,
{
    config.validate()?;
    check_root(&config.root)?;

    let inventory_path = config.inventory_path();
    if inventory_path.is_file() {
        log::debug!("Removing stale inventory: {}", inventory_path.display());
        std::fs::remove_file(&inventory_path)?;
    }

    let mut report = build_dataset(config, prober, extractor, validator)?;
    write_inventory(&report.rows, &inventory_path)?;
    report.inventory_path = Some(inventory_path);
    Ok(report)
}
