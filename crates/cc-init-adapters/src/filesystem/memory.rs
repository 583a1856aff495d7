//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use cc_init_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, WriteOutcome},
    },
    domain::{FileMode, FileStat},
    error::{InitError, InitResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can hand one clone to the
/// engine and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, (Vec<u8>, FileMode)>,
    directories: BTreeMap<PathBuf, FileMode>,
    read_only: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn ensure_directory(&mut self, path: &Path, mode: FileMode) -> InitResult<()> {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if self.files.contains_key(&current) {
                return Err(ApplicationError::NotADirectory { path: current }.into());
            }
            if self.directories.contains_key(&current) {
                continue;
            }
            self.check_writable(&current, "create directory")?;
            self.directories.insert(current.clone(), mode);
        }
        Ok(())
    }

    fn check_writable(&self, path: &Path, operation: &'static str) -> InitResult<()> {
        if self.read_only.iter().any(|root| path.starts_with(root)) {
            return Err(ApplicationError::storage(
                path,
                operation,
                io::Error::from(io::ErrorKind::PermissionDenied),
            )
            .into());
        }
        Ok(())
    }
}

fn poisoned() -> InitError {
    InitError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> InitResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> InitResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }

    /// Seed a directory and its parents (testing helper).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            let _ = inner.ensure_directory(path.as_ref(), FileMode::DIRECTORY);
        }
    }

    /// Seed a file and its parents (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: &[u8]) {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                let _ = inner.ensure_directory(parent, FileMode::DIRECTORY);
            }
            inner
                .files
                .insert(path.to_path_buf(), (content.to_vec(), FileMode::DATA));
        }
    }

    /// Make every write at or below `path` fail with `PermissionDenied`.
    pub fn deny_writes(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.as_ref().to_path_buf());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).map(|(content, _)| content.clone())
    }

    /// Mode a file or directory was created with.
    pub fn mode_of(&self, path: &Path) -> Option<FileMode> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .map(|(_, mode)| *mode)
            .or_else(|| inner.directories.get(path).copied())
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// `true` if nothing has been created or seeded.
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.is_empty() && inner.directories.is_empty())
            .unwrap_or(true)
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains_key(path))
            .unwrap_or(false)
    }

    fn create_directory(&self, path: &Path, mode: FileMode) -> InitResult<WriteOutcome> {
        let mut inner = self.write()?;
        if inner.directories.contains_key(path) {
            return Ok(WriteOutcome::Skipped);
        }
        inner.ensure_directory(path, mode)?;
        Ok(WriteOutcome::Created)
    }

    fn create_file(
        &self,
        path: &Path,
        content: &[u8],
        mode: FileMode,
    ) -> InitResult<WriteOutcome> {
        let mut inner = self.write()?;

        if inner.directories.contains_key(path) {
            return Err(ApplicationError::IsADirectory {
                path: path.to_path_buf(),
            }
            .into());
        }
        if inner.files.contains_key(path) {
            return Ok(WriteOutcome::Skipped);
        }

        if let Some(parent) = path.parent() {
            inner.ensure_directory(parent, FileMode::DIRECTORY)?;
        }
        inner.check_writable(path, "write file")?;
        inner
            .files
            .insert(path.to_path_buf(), (content.to_vec(), mode));
        Ok(WriteOutcome::Created)
    }

    fn stat(&self, path: &Path) -> InitResult<FileStat> {
        let inner = self.read()?;
        if inner.directories.contains_key(path) {
            return Ok(FileStat::directory());
        }
        match inner.files.get(path) {
            Some((content, _)) => Ok(FileStat::file(content.len() as u64)),
            None => Err(ApplicationError::storage(
                path,
                "stat",
                io::Error::from(io::ErrorKind::NotFound),
            )
            .into()),
        }
    }

    fn walk(&self, root: &Path) -> InitResult<Vec<PathBuf>> {
        let inner = self.read()?;
        let below: BTreeSet<&PathBuf> = inner
            .directories
            .keys()
            .chain(inner.files.keys())
            .filter(|p| p.starts_with(root) && p.as_path() != root)
            .collect();
        Ok(below.into_iter().cloned().collect())
    }
}
