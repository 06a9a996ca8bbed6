// ============================================================================
// framesplit-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types
//
// This module defines the error type shared by every part of the core library.
// Per-item failures (a probe that fails, a frame that cannot be extracted, an
// image that does not decode) are recovered where they happen and never reach
// the caller as a `CoreError`; only structural problems with the dataset tree,
// configuration errors and I/O failures on the tree itself propagate.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors produced by the framesplit core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Dataset root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    /// Carries the images removed as corrupt before the scan came up empty.
    #[error("No categories with videos or images found in {}", root.display())]
    NoCategoriesFound {
        root: PathBuf,
        corrupted_images: Vec<PathBuf>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, std::io::Error),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, std::io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Failed to parse ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("Image could not be decoded: {0}")]
    ImageDecode(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a command that could not be spawned.
pub fn command_start_error(cmd_name: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd_name.into(), err)
}

/// Builds a [`CoreError::CommandWait`] for a command whose exit could not be collected.
pub fn command_wait_error(cmd_name: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandWait(cmd_name.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] for a command that exited unsuccessfully.
pub fn command_failed_error(
    cmd_name: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd_name.into(), status, stderr.into())
}

impl CoreError {
    /// True when the dataset tree itself is unusable: a missing or
    /// non-directory root, or a root without any category.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CoreError::RootNotFound(_)
                | CoreError::RootNotDirectory(_)
                | CoreError::NoCategoriesFound { .. }
        )
    }

    /// Images deleted as corrupt before the run failed.
    #[must_use]
    pub fn corrupted_images(&self) -> &[PathBuf] {
        match self {
            CoreError::NoCategoriesFound {
                corrupted_images, ..
            } => corrupted_images,
            _ => &[],
        }
    }
}
