//! Category discovery for the dataset root.
//!
//! Every direct subdirectory of the root is a category. Its top-level files
//! are split into videos and images by extension; images that fail to decode
//! are deleted from disk and reported back to the caller instead of being
//! listed. Listings are sorted by file name so runs are reproducible.

use crate::config::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use crate::error::{CoreError, CoreResult};
use crate::external::ImageValidator;

use rand::Rng;
use std::path::{Path, PathBuf};

/// Lower and upper bound (inclusive) of the per-category rename suffix.
pub const RENAME_SUFFIX_RANGE: std::ops::RangeInclusive<u32> = 1..=50;

/// Media found in one category directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryContents {
    /// Directory name, used as the category label
    pub name: String,
    /// Category directory
    pub path: PathBuf,
    /// Video files, sorted by name
    pub videos: Vec<PathBuf>,
    /// Decodable image files, sorted by name
    pub images: Vec<PathBuf>,
}

/// Outcome of scanning the dataset root.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Categories owning at least one video or valid image, sorted by name
    pub categories: Vec<CategoryContents>,
    /// Images that failed to decode and were removed from disk
    pub corrupted_images: Vec<PathBuf>,
}

/// Renames planned for one category, applied all at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub suffix: u32,
    pub moves: Vec<(PathBuf, PathBuf)>,
}

fn has_extension_in(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// True for existing files with a recognized video extension (case-insensitive).
#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    path.is_file() && has_extension_in(path, VIDEO_EXTENSIONS)
}

/// True for existing files with a recognized image extension (case-insensitive).
#[must_use]
pub fn is_image_file(path: &Path) -> bool {
    path.is_file() && has_extension_in(path, IMAGE_EXTENSIONS)
}

/// True for any path with a recognized video extension, existing or not.
#[must_use]
pub fn has_video_extension(path: &Path) -> bool {
    has_extension_in(path, VIDEO_EXTENSIONS)
}

/// Entries of `dir`, sorted by file name.
fn sorted_entries(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

/// Deletes an undecodable image. A failed delete is logged; the image is
/// excluded either way.
fn purge_corrupt_image(path: &Path) {
    log::warn!("Removing corrupt image: {}", path.display());
    if let Err(e) = std::fs::remove_file(path) {
        log::error!("Failed to delete corrupt image {}: {}", path.display(), e);
    }
}

/// Keeps the decodable images among `entries`, purging the rest into `corrupted`.
fn collect_valid_images<V: ImageValidator>(
    entries: &[PathBuf],
    validator: &V,
    corrupted: &mut Vec<PathBuf>,
) -> Vec<PathBuf> {
    let mut valid = Vec::new();
    for path in entries.iter().filter(|p| is_image_file(p)) {
        if validator.is_decodable(path) {
            valid.push(path.clone());
        } else {
            purge_corrupt_image(path);
            corrupted.push(path.clone());
        }
    }
    valid
}

/// Draws the rename suffix for one category. Not seeded: renamed file names
/// differ between runs.
pub fn draw_rename_suffix<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(RENAME_SUFFIX_RANGE)
}

/// Plans `<category><suffix>_<counter>.<ext>` names for `images`, in order,
/// with a 1-based four-digit counter and the original extension.
#[must_use]
pub fn plan_renames(category: &str, images: &[PathBuf], suffix: u32) -> RenamePlan {
    let moves = images
        .iter()
        .enumerate()
        .map(|(idx, from)| {
            let ext = from
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            let name = format!("{category}{suffix}_{:04}{ext}", idx + 1);
            (from.clone(), from.with_file_name(name))
        })
        .collect();
    RenamePlan { suffix, moves }
}

/// Moves each `(src, dst)` pair back from `dst` to `src`, last move first.
/// Failures are logged and the remaining moves are still attempted.
fn undo_moves(moves: &[(PathBuf, PathBuf)]) {
    for (src, dst) in moves.iter().rev() {
        if let Err(e) = std::fs::rename(dst, src) {
            log::warn!(
                "Could not restore {} from {}: {}",
                src.display(),
                dst.display(),
                e
            );
        }
    }
}

/// Applies a rename plan in two phases (source to a temporary name, then to
/// the final name) so a target that is still another image's current name is
/// never overwritten.
///
/// If any move fails, every completed move is undone and the images keep
/// their original names.
pub fn apply_renames(plan: &RenamePlan) -> CoreResult<()> {
    let pending: Vec<&(PathBuf, PathBuf)> =
        plan.moves.iter().filter(|(from, to)| from != to).collect();

    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(pending.len());
    for (idx, (from, _)) in pending.iter().enumerate() {
        let temp = from.with_file_name(format!(".framesplit-rename-{idx:04}.tmp"));
        if let Err(e) = std::fs::rename(from, &temp) {
            undo_moves(&staged);
            return Err(CoreError::PathError(format!(
                "Failed to rename {}: {}",
                from.display(),
                e
            )));
        }
        staged.push((from.clone(), temp));
    }

    let mut finished: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(staged.len());
    for ((_, temp), (_, to)) in staged.iter().zip(&pending) {
        if let Err(e) = std::fs::rename(temp, to) {
            undo_moves(&finished);
            undo_moves(&staged);
            return Err(CoreError::PathError(format!(
                "Failed to rename to {}: {}",
                to.display(),
                e
            )));
        }
        finished.push((temp.clone(), to.clone()));
    }
    log::debug!("Renamed {} image(s) with suffix {}", pending.len(), plan.suffix);
    Ok(())
}

/// Scans `root` for categories.
///
/// With `rename_images`, the valid images of each category are renamed
/// before the final listing is built, and that listing is validated again.
///
/// # Errors
///
/// `RootNotFound` / `RootNotDirectory` for a bad root, or an I/O error when a
/// directory cannot be listed.
pub fn scan_categories<V: ImageValidator>(
    root: &Path,
    rename_images: bool,
    validator: &V,
) -> CoreResult<ScanResult> {
    if !root.exists() {
        return Err(CoreError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(CoreError::RootNotDirectory(root.to_path_buf()));
    }

    let mut rng = rand::thread_rng();
    let mut result = ScanResult::default();

    for category_dir in sorted_entries(root)? {
        if !category_dir.is_dir() {
            continue;
        }
        let name = category_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut entries = sorted_entries(&category_dir)?;
        let videos: Vec<PathBuf> = entries.iter().filter(|p| is_video_file(p)).cloned().collect();

        if rename_images {
            log::info!("Renaming images of category '{}'", name);
            let images = collect_valid_images(&entries, validator, &mut result.corrupted_images);
            let plan = plan_renames(&name, &images, draw_rename_suffix(&mut rng));
            apply_renames(&plan)?;
            entries = sorted_entries(&category_dir)?;
        }

        let images = collect_valid_images(&entries, validator, &mut result.corrupted_images);

        if videos.is_empty() && images.is_empty() {
            log::debug!("Skipping category '{}': no videos or images", name);
            continue;
        }
        result.categories.push(CategoryContents {
            name,
            path: category_dir,
            videos,
            images,
        });
    }

    Ok(result)
}
