//! Command implementations for the CLI.

/// Module containing the implementation of the dataset preparation run.
/// Builds frames and splits, writes the inventory and exports the archive.
pub mod prepare;
