// ============================================================================
// framesplit-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg, ffprobe and Image Decoding
//
// This module encapsulates every collaborator the dataset builder needs from
// the outside world: probing a video's duration, extracting one frame at a
// timestamp, and checking whether an image decodes. Each is a narrow trait so
// the builder and scanner can be driven by scripted fakes in tests.
//
// KEY COMPONENTS:
// - MediaProber / FrameExtractor / ImageValidator traits
// - FfprobeProber: duration probing via the ffprobe crate
// - FfmpegFrameExtractor: single-frame extraction via ffmpeg-sidecar
// - DecodeImageValidator: decodability check via the image crate
// - Dependency checking

use crate::error::{CoreError, CoreResult};

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Spawning ffmpeg and extracting frames
pub mod ffmpeg_executor;

/// Probing video durations with ffprobe
pub mod ffprobe_executor;

/// Image decodability checks
pub mod image_validator;

#[cfg(feature = "test-mocks")]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{
    FfmpegFrameExtractor, FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner,
    build_frame_command,
};
pub use ffprobe_executor::FfprobeProber;
pub use image_validator::DecodeImageValidator;

// ============================================================================
// COLLABORATOR TRAITS
// ============================================================================

/// Reads the duration of a video.
pub trait MediaProber {
    /// Duration of `video` in seconds.
    fn probe_duration(&self, video: &Path) -> CoreResult<f64>;
}

/// Writes a single still frame of a video to an image file.
pub trait FrameExtractor {
    /// Extracts the frame at `timestamp` seconds into `output`, overwriting it.
    fn extract_frame(&self, video: &Path, timestamp: f64, output: &Path) -> CoreResult<()>;
}

/// Decides whether an image file can be decoded.
pub trait ImageValidator {
    fn is_decodable(&self, image: &Path) -> bool;
}

impl<T: MediaProber + ?Sized> MediaProber for &T {
    fn probe_duration(&self, video: &Path) -> CoreResult<f64> {
        (**self).probe_duration(video)
    }
}

impl<T: FrameExtractor + ?Sized> FrameExtractor for &T {
    fn extract_frame(&self, video: &Path, timestamp: f64, output: &Path) -> CoreResult<()> {
        (**self).extract_frame(video, timestamp, output)
    }
}

impl<T: ImageValidator + ?Sized> ImageValidator for &T {
    fn is_decodable(&self, image: &Path) -> bool {
        (**self).is_decodable(image)
    }
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started.
///
/// Runs `<cmd_name> -version` with output discarded. Only a failure to start
/// the process counts; the exit status is ignored.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dependency_is_reported() {
        let result = check_dependency("framesplit-surely-not-a-real-binary-42");
        assert!(matches!(result, Err(CoreError::DependencyNotFound(name)) if name.contains("framesplit")));
    }
}
