// framesplit-cli/src/config.rs
//
// Defines default configuration constants for the `framesplit-cli` application.

/// Dataset root used when neither `--root` nor `FRAMESPLIT_ROOT` is given.
pub const DEFAULT_ROOT: &str = "data";

pub const DEFAULT_CSV_NAME: &str = framesplit_core::config::DEFAULT_INVENTORY_NAME;

/// External tools checked before a build.
pub const REQUIRED_TOOLS: [&str; 2] = ["ffprobe", "ffmpeg"];
