//! Infrastructure adapters for cc-init.
//!
//! This crate implements the ports defined in `cc-init-core::application::ports`.
//! It contains the embedded template bundle and all I/O operations.

pub mod assets;
pub mod filesystem;
pub mod reporter;

// Re-export commonly used adapters
pub use assets::{AssetTree, AssetTreeError};
pub use filesystem::{DryRunFilesystem, LocalFilesystem, MemoryFilesystem};
pub use reporter::{Notice, NoticeLevel, RecordingReporter};
