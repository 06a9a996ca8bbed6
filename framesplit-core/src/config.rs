// ============================================================================
// framesplit-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration used throughout the framesplit-core
// library: where the dataset lives, how the inventory is named, how media is
// split, and how frames are encoded.
//
// KEY COMPONENTS:
// - CoreConfig: Main configuration structure for the library
// - Recognized media extensions
// - Default constants: split seed, inventory name, JPEG quality
//
// USAGE:
// Instances of CoreConfig are created by consumers of the library (like
// framesplit-cli) and passed to `process_dataset`.

use crate::error::{CoreError, CoreResult};
use crate::splits::SplitRatios;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

// ============================================================================
// MEDIA EXTENSIONS
// ============================================================================

/// File extensions (lowercase, without the dot) recognized as videos.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "webm", "mpeg", "mpg", "flv", "ogg", "3gp", "ts",
];

/// File extensions (lowercase, without the dot) recognized as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp"];

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Seed the split generator is reset to before every partition.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Default name of the inventory file written inside the dataset root.
pub const DEFAULT_INVENTORY_NAME: &str = "inventory.csv";

/// Name of the per-category directory holding extracted frames.
pub const FRAMES_DIR_NAME: &str = "frames";

/// ffmpeg `-q:v` value for extracted JPEG frames. 2 is near the top of the
/// 2..=31 scale, lower is better.
pub const DEFAULT_JPEG_QUALITY: u8 = 2;

/// Number of frames sampled from every video.
pub const FRAMES_PER_VIDEO: usize = 3;

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for the framesplit-core library.
///
/// # Examples
///
/// ```rust,no_run
/// use framesplit_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(PathBuf::from("data"));
/// config.rename_images = true;
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----
    /// Dataset root holding one subdirectory per category
    pub root: PathBuf,

    /// File name of the inventory written inside `root`
    pub inventory_name: String,

    // ---- Scanning ----
    /// Rename every valid image to `<category><n>_<counter>.<ext>` before listing
    pub rename_images: bool,

    // ---- Splitting ----
    /// Train/val/test proportions
    pub split_ratios: SplitRatios,

    /// Seed the split generator is reset to before every partition call
    pub split_seed: u64,

    // ---- Frame Extraction ----
    /// ffmpeg `-q:v` value for extracted frames
    pub jpeg_quality: u8,

    // ---- Archive Export ----
    /// Whether to produce a sanitized (video-free) archive after the build
    pub export_archive: bool,

    /// Archive destination; defaults to `<root>_.zip` next to the root
    pub archive_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Creates a configuration for `root` with every other field at its default.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            inventory_name: DEFAULT_INVENTORY_NAME.to_string(),
            rename_images: false,
            split_ratios: SplitRatios::default(),
            split_seed: DEFAULT_SPLIT_SEED,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            export_archive: true,
            archive_path: None,
        }
    }

    /// Checks the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        self.split_ratios.validate()?;

        if self.inventory_name.trim().is_empty() {
            return Err(CoreError::Config(
                "Inventory file name must not be empty".to_string(),
            ));
        }
        if self.inventory_name.contains('/') || self.inventory_name.contains('\\') {
            return Err(CoreError::Config(format!(
                "Inventory file name must not contain a path separator: {}",
                self.inventory_name
            )));
        }
        if !(2..=31).contains(&self.jpeg_quality) {
            return Err(CoreError::Config(format!(
                "JPEG quality must be between 2 and 31, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Location of the inventory file.
    #[must_use]
    pub fn inventory_path(&self) -> PathBuf {
        self.root.join(&self.inventory_name)
    }

    /// Location of the sanitized archive, explicit or derived from the root.
    #[must_use]
    pub fn resolved_archive_path(&self) -> PathBuf {
        self.archive_path
            .clone()
            .unwrap_or_else(|| default_archive_path(&self.root))
    }
}

/// `<parent>/<root-name>_.zip`, the archive location used when none is given.
///
/// A root without a final name (`.`, `..`) is canonicalized first so the
/// archive still lands beside the dataset instead of inside it.
#[must_use]
pub fn default_archive_path(root: &Path) -> PathBuf {
    let root: Cow<'_, Path> = match root.file_name() {
        Some(_) => Cow::Borrowed(root),
        None => root.canonicalize().map_or(Cow::Borrowed(root), Cow::Owned),
    };
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "data".to_string());
    let parent = root
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    parent.join(format!("{name}_.zip"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CoreConfig::new(PathBuf::from("data"));
        assert!(config.validate().is_ok());
        assert_eq!(config.inventory_path(), PathBuf::from("data/inventory.csv"));
        assert_eq!(config.split_seed, 42);
        assert!(!config.rename_images);
    }

    #[test]
    fn rejects_bad_inventory_names() {
        let mut config = CoreConfig::new(PathBuf::from("data"));
        config.inventory_name = "   ".to_string();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config.inventory_name = "out/inventory.csv".to_string();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_out_of_range_quality() {
        let mut config = CoreConfig::new(PathBuf::from("data"));
        config.jpeg_quality = 1;
        assert!(config.validate().is_err());
        config.jpeg_quality = 32;
        assert!(config.validate().is_err());
    }

    #[test]
    fn archive_path_defaults_next_to_root() {
        assert_eq!(
            default_archive_path(Path::new("/srv/datasets/data")),
            PathBuf::from("/srv/datasets/data_.zip")
        );
        assert_eq!(default_archive_path(Path::new("data")), PathBuf::from("./data_.zip"));

        let mut config = CoreConfig::new(PathBuf::from("data"));
        config.archive_path = Some(PathBuf::from("/tmp/out.zip"));
        assert_eq!(config.resolved_archive_path(), PathBuf::from("/tmp/out.zip"));
    }

    #[test]
    fn archive_path_for_unnamed_root_stays_outside_it() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(data.join("cats")).unwrap();

        let archive = default_archive_path(&data.join("cats").join(".."));
        let canonical = data.canonicalize().unwrap();
        assert_eq!(archive, canonical.with_file_name("data_.zip"));
        assert!(!archive.starts_with(&canonical));
    }
}
