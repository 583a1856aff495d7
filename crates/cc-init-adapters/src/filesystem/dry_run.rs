//! Dry-run decorator: real reads, simulated writes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use cc_init_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, Reporter, WriteOutcome},
    },
    domain::{FileMode, FileStat},
    error::InitResult,
};

/// Wraps another filesystem, consulting it for existence and kind but never
/// writing through it.
///
/// Creation calls make the same skip/conflict decisions the wrapped adapter
/// would and narrate the intended effect instead.
pub struct DryRunFilesystem {
    inner: Box<dyn Filesystem>,
    reporter: Arc<dyn Reporter>,
}

impl DryRunFilesystem {
    pub fn new(inner: Box<dyn Filesystem>, reporter: Arc<dyn Reporter>) -> Self {
        Self { inner, reporter }
    }

    /// Fail the way a real write would when a non-directory sits where one
    /// of `path`'s ancestors should be.
    fn check_ancestors(&self, path: &Path) -> InitResult<()> {
        for ancestor in path.ancestors().skip(1) {
            if self.inner.exists(ancestor) {
                if !self.inner.stat(ancestor)?.is_dir() {
                    return Err(ApplicationError::NotADirectory {
                        path: ancestor.to_path_buf(),
                    }
                    .into());
                }
                // Everything above an existing directory is a directory.
                return Ok(());
            }
        }
        Ok(())
    }
}

impl Filesystem for DryRunFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn create_directory(&self, path: &Path, mode: FileMode) -> InitResult<WriteOutcome> {
        if self.inner.exists(path) {
            if !self.inner.stat(path)?.is_dir() {
                return Err(ApplicationError::NotADirectory {
                    path: path.to_path_buf(),
                }
                .into());
            }
            self.reporter
                .info(&format!("Would skip existing directory: {}", path.display()));
            return Ok(WriteOutcome::Skipped);
        }
        self.check_ancestors(path)?;

        debug!(path = %path.display(), "Simulated directory creation");
        self.reporter.info(&format!(
            "Would create directory: {} (mode: {})",
            path.display(),
            mode
        ));
        Ok(WriteOutcome::Created)
    }

    fn create_file(
        &self,
        path: &Path,
        content: &[u8],
        mode: FileMode,
    ) -> InitResult<WriteOutcome> {
        if self.inner.exists(path) {
            if self.inner.stat(path)?.is_dir() {
                return Err(ApplicationError::IsADirectory {
                    path: path.to_path_buf(),
                }
                .into());
            }
            self.reporter
                .info(&format!("Would skip existing file: {}", path.display()));
            return Ok(WriteOutcome::Skipped);
        }
        self.check_ancestors(path)?;

        debug!(path = %path.display(), bytes = content.len(), "Simulated file creation");
        self.reporter.info(&format!(
            "Would create file: {} (mode: {}, size: {} bytes)",
            path.display(),
            mode,
            content.len()
        ));
        Ok(WriteOutcome::Created)
    }

    fn stat(&self, path: &Path) -> InitResult<FileStat> {
        self.inner.stat(path)
    }

    fn walk(&self, root: &Path) -> InitResult<Vec<PathBuf>> {
        self.inner.walk(root)
    }
}
