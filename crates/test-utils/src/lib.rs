//! Shared test utilities for the spectral workspace.
//!
//! Provides pre-built fixture records, stub implementations of the external
//! collaborator traits (hull computation, raster I/O), and temp-dir helpers
//! for file round-trip tests.
//!
//! Add to a crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod collaborators;
pub mod fixtures;

pub use collaborators::{GridRaster, MemoryRasters, RectHull};
pub use fixtures::*;

/// A fresh temporary directory, cleaned up on drop.
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}
