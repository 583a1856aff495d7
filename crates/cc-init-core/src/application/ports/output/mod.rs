//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cc-init-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{EntryKind, FileMode, FileStat};
use crate::error::InitResult;

/// What a creation call did to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Written, or in a dry run, would be written.
    Created,
    /// Already present and left alone.
    Skipped,
}

/// Port for destination filesystem operations.
///
/// Implemented by:
/// - `cc_init_adapters::filesystem::LocalFilesystem` (production)
/// - `cc_init_adapters::filesystem::DryRunFilesystem` (simulation)
/// - `cc_init_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Contract
///
/// - `create_directory` and `create_file` return [`WriteOutcome::Skipped`]
///   without touching anything when an entry of the right kind already
///   exists, including one that appears between the check and the write.
/// - A wrong-kind entry yields `ApplicationError::NotADirectory` /
///   `ApplicationError::IsADirectory`. A non-directory standing where an
///   ancestor should be is `NotADirectory` naming that ancestor.
/// - `exists` sees every entry, dangling symlinks included.
/// - Every other failure is `ApplicationError::Storage`.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and any missing parents.
    fn create_directory(&self, path: &Path, mode: FileMode) -> InitResult<WriteOutcome>;

    /// Create a file with the full content, creating its parent if needed.
    fn create_file(&self, path: &Path, content: &[u8], mode: FileMode)
    -> InitResult<WriteOutcome>;

    /// Kind and size of an existing path.
    fn stat(&self, path: &Path) -> InitResult<FileStat>;

    /// Every path below `root`, parents before children.
    fn walk(&self, root: &Path) -> InitResult<Vec<PathBuf>>;
}

/// A node of the bundled template tree, with its full in-bundle path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetNode {
    /// Slash-separated path including the bundle root, e.g. `.claude/settings.json`.
    pub path: String,
    pub kind: EntryKind,
}

impl AssetNode {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Port for the read-only template bundle.
///
/// Implemented by:
/// - `cc_init_adapters::assets::AssetTree` (embedded and in-memory trees)
pub trait AssetSource: Send + Sync {
    /// All nodes, parents before children, siblings in a stable order.
    fn nodes(&self) -> Box<dyn Iterator<Item = AssetNode> + '_>;

    /// Body of the file at `path`, or `None` if no such file exists.
    fn read(&self, path: &str) -> Option<Vec<u8>>;
}

/// Port for narrating a run to the user.
///
/// Purely observational: nothing the engine decides depends on it.
#[cfg_attr(test, mockall::automock)]
pub trait Reporter: Send + Sync {
    fn success(&self, msg: &str);

    fn info(&self, msg: &str);

    fn warning(&self, msg: &str);

    fn error(&self, msg: &str);

    /// Only shown in verbose mode.
    fn debug(&self, msg: &str);
}
