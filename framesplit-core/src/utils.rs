//! Formatting and path helpers shared by the library and the CLI.

use std::path::Path;
use std::time::Duration;

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Elapsed wall time in minutes, two decimals (e.g. 90s -> "1.50 min").
#[must_use]
pub fn format_elapsed_minutes(elapsed: Duration) -> String {
    format!("{:.2} min", elapsed.as_secs_f64() / 60.0)
}

/// Safely extracts filename from a path with consistent error handling.
/// Returns the filename as a String, or an error if the path has no filename component.
pub fn get_filename_safe(path: &Path) -> crate::CoreResult<String> {
    Ok(path
        .file_name()
        .ok_or_else(|| {
            crate::CoreError::PathError(format!("Failed to get filename for {}", path.display()))
        })?
        .to_string_lossy()
        .to_string())
}
