//! FFprobe integration for reading video durations.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::external::MediaProber;

use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Probes durations by running ffprobe through the `ffprobe` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeProber;

impl MediaProber for FfprobeProber {
    fn probe_duration(&self, video: &Path) -> CoreResult<f64> {
        log::debug!("Running ffprobe for duration on: {}", video.display());
        match ffprobe(video) {
            Ok(metadata) => parse_duration(metadata.format.duration.as_deref(), video),
            Err(err) => {
                log::debug!("ffprobe failed for {}: {:?}", video.display(), err);
                Err(map_ffprobe_error(err))
            }
        }
    }
}

/// Parses ffprobe's `format.duration` field into seconds.
fn parse_duration(raw: Option<&str>, video: &Path) -> CoreResult<f64> {
    let raw = raw.ok_or_else(|| {
        CoreError::FfprobeParse(format!("No duration reported for {}", video.display()))
    })?;
    let seconds: f64 = raw.trim().parse().map_err(|_| {
        CoreError::FfprobeParse(format!(
            "Unparsable duration '{}' for {}",
            raw,
            video.display()
        ))
    })?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(CoreError::FfprobeParse(format!(
            "Invalid duration {} for {}",
            seconds,
            video.display()
        )));
    }
    Ok(seconds)
}

fn map_ffprobe_error(err: FfProbeError) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error("ffprobe", io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error("ffprobe", output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("ffprobe output deserialization: {err}"))
        }
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error: {err:?}")),
    }
}
