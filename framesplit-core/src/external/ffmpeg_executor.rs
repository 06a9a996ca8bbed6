// ============================================================================
// framesplit-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Frame Extraction
//
// This module provides the abstraction for spawning ffmpeg processes and the
// frame extractor built on top of it.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - FfmpegFrameExtractor: One JPEG still per call, seeked before decoding

use crate::config::DEFAULT_JPEG_QUALITY;
use crate::error::{CoreResult, command_failed_error, command_start_error, command_wait_error};
use crate::external::FrameExtractor;

use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::path::Path;
use std::process::ExitStatus;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            command_failed_error("ffmpeg (sidecar - get iter)", ExitStatus::default(), e.to_string())
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))
    }
}

// --- Frame Extraction ---

/// Builds the ffmpeg command extracting one frame at `timestamp` into `output`.
///
/// The seek is placed before the input so ffmpeg jumps straight to the
/// nearest keyframe instead of decoding from the start.
#[must_use]
pub fn build_frame_command(
    video: &Path,
    timestamp: f64,
    output: &Path,
    jpeg_quality: u8,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner()
        .args(["-loglevel", "error"])
        .arg("-ss")
        .arg(format!("{timestamp:.3}"))
        .input(video.to_string_lossy().into_owned())
        .args(["-frames:v", "1"])
        .arg("-q:v")
        .arg(jpeg_quality.to_string())
        .arg("-y")
        .output(output.to_string_lossy().into_owned());
    cmd
}

/// Extracts frames by spawning ffmpeg once per frame.
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor<S: FfmpegSpawner = SidecarSpawner> {
    spawner: S,
    jpeg_quality: u8,
}

impl FfmpegFrameExtractor<SidecarSpawner> {
    #[must_use]
    pub fn new(jpeg_quality: u8) -> Self {
        Self::with_spawner(SidecarSpawner, jpeg_quality)
    }
}

impl Default for FfmpegFrameExtractor<SidecarSpawner> {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl<S: FfmpegSpawner> FfmpegFrameExtractor<S> {
    pub fn with_spawner(spawner: S, jpeg_quality: u8) -> Self {
        Self {
            spawner,
            jpeg_quality,
        }
    }
}

impl<S: FfmpegSpawner> FrameExtractor for FfmpegFrameExtractor<S> {
    fn extract_frame(&self, video: &Path, timestamp: f64, output: &Path) -> CoreResult<()> {
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let cmd = build_frame_command(video, timestamp, output, self.jpeg_quality);
        log::debug!(
            "Running: ffmpeg {}",
            cmd.get_args()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let mut child = self.spawner.spawn(cmd)?;
        let mut stderr_output = String::new();
        let events = child.handle_events(|event| {
            if let FfmpegEvent::Log(_, line) | FfmpegEvent::Error(line) = event {
                stderr_output.push_str(&line);
                stderr_output.push('\n');
            }
            Ok(())
        });
        // Always reap the child, even when reading its events failed.
        let status = child.wait()?;
        events?;

        if !status.success() {
            return Err(command_failed_error(
                "ffmpeg (frame extraction)",
                status,
                stderr_output.trim_end(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn args_of(cmd: &FfmpegCommand) -> Vec<String> {
        cmd.get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn frame_command_seeks_before_input() {
        let cmd = build_frame_command(
            Path::new("data/cats/clip.mp4"),
            1.5,
            Path::new("data/cats/frames/train/frame_clip_000002.jpg"),
            2,
        );
        let args = args_of(&cmd);

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(ss < input);
        assert_eq!(args[ss + 1], "1.500");
        assert_eq!(args[input + 1], "data/cats/clip.mp4");

        let frames = args.iter().position(|a| a == "-frames:v").unwrap();
        assert_eq!(args[frames + 1], "1");
        let quality = args.iter().position(|a| a == "-q:v").unwrap();
        assert_eq!(args[quality + 1], "2");
        assert!(args.iter().any(|a| a == "-y"));
        assert_eq!(
            args.last().map(String::as_str),
            Some("data/cats/frames/train/frame_clip_000002.jpg")
        );
    }

    #[cfg(unix)]
    mod spawning {
        use super::*;
        use std::os::unix::process::ExitStatusExt;

        struct ScriptedProcess {
            events: Vec<FfmpegEvent>,
            status: ExitStatus,
        }

        impl FfmpegProcess for ScriptedProcess {
            fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
            where
                F: FnMut(FfmpegEvent) -> CoreResult<()>,
            {
                for event in self.events.drain(..) {
                    handler(event)?;
                }
                Ok(())
            }

            fn wait(&mut self) -> CoreResult<ExitStatus> {
                Ok(self.status)
            }
        }

        #[derive(Clone)]
        struct ScriptedSpawner {
            raw_status: i32,
            calls: Rc<RefCell<Vec<Vec<String>>>>,
        }

        impl FfmpegSpawner for ScriptedSpawner {
            type Process = ScriptedProcess;

            fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
                self.calls.borrow_mut().push(args_of(&cmd));
                Ok(ScriptedProcess {
                    events: vec![FfmpegEvent::Error("Invalid data found".to_string())],
                    status: ExitStatus::from_raw(self.raw_status),
                })
            }
        }

        #[test]
        fn successful_extraction_creates_parent_dir() {
            let dir = tempfile::tempdir().unwrap();
            let output: PathBuf = dir.path().join("frames/val/frame_clip_000001.jpg");
            let spawner = ScriptedSpawner {
                raw_status: 0,
                calls: Rc::default(),
            };
            let extractor = FfmpegFrameExtractor::with_spawner(spawner.clone(), 2);

            extractor
                .extract_frame(Path::new("clip.mp4"), 0.3, &output)
                .unwrap();

            assert!(output.parent().unwrap().is_dir());
            assert_eq!(spawner.calls.borrow().len(), 1);
        }

        #[test]
        fn non_zero_exit_is_a_command_failure() {
            let dir = tempfile::tempdir().unwrap();
            let output = dir.path().join("frame.jpg");
            let spawner = ScriptedSpawner {
                raw_status: 1 << 8,
                calls: Rc::default(),
            };
            let extractor = FfmpegFrameExtractor::with_spawner(spawner, 2);

            let err = extractor
                .extract_frame(Path::new("broken.mp4"), 0.0, &output)
                .unwrap_err();
            match err {
                CoreError::CommandFailed(name, status, stderr) => {
                    assert!(name.contains("frame extraction"));
                    assert!(!status.success());
                    assert_eq!(stderr, "Invalid data found");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
