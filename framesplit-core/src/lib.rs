//! Core library for preparing image-classification datasets from per-category
//! videos and images.
//!
//! This crate samples three frames from every video with ffmpeg, assigns
//! videos and images to reproducible train/val/test splits, writes a CSV
//! inventory of everything produced, and exports a video-free zip of the
//! finished dataset.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use framesplit_core::{CoreConfig, process_dataset, export_sanitized_archive};
//! use framesplit_core::external::{DecodeImageValidator, FfmpegFrameExtractor, FfprobeProber};
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(PathBuf::from("data"));
//! config.rename_images = true;
//! config.validate().unwrap();
//!
//! let extractor = FfmpegFrameExtractor::new(config.jpeg_quality);
//! let report = process_dataset(&config, &FfprobeProber, &extractor, &DecodeImageValidator).unwrap();
//! println!("{} inventory rows", report.rows.len());
//!
//! export_sanitized_archive(&config.root, &config.resolved_archive_path()).unwrap();
//! ```

pub mod archive;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod file_logging;
pub mod inventory;
pub mod processing;
pub mod reporting;
pub mod sampling;
pub mod splits;
pub mod utils;

// Re-exports for public API
pub use archive::{ArchiveReport, export_sanitized_archive};
pub use config::{CoreConfig, default_archive_path};
pub use discovery::{CategoryContents, ScanResult, scan_categories};
pub use error::{CoreError, CoreResult};
pub use external::{FrameExtractor, ImageValidator, MediaProber, check_dependency};
pub use inventory::{InventoryRow, SourceType, write_inventory};
pub use processing::{BuildReport, build_dataset, process_dataset};
pub use reporting::{RunSummary, write_summary_json};
pub use sampling::choose_timestamps;
pub use splits::{Partition, Split, SplitRatios, partition};
pub use utils::{format_duration, format_elapsed_minutes, get_filename_safe};
