//! Summary reporting module
//!
//! This module turns a finished run into a serializable summary for the
//! terminal and for `--summary-json`.

pub mod summary;

pub use summary::{RunSummary, write_summary_json};
