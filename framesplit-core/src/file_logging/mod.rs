//! log4rs-backed logging that mirrors console output into a run log file.

pub mod setup;

pub use setup::{log_file_name, setup_file_logging};
