//! Local filesystem adapter using `std::fs`.

use std::fs::{self, DirBuilder};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use cc_init_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, WriteOutcome},
    },
    domain::{FileMode, FileStat},
    error::InitResult,
};

/// Production filesystem implementation.
///
/// Never replaces an existing entry: files are staged in a temporary file
/// next to the destination and moved into place with a no-clobber rename.
/// Symlinks count as entries even when their target is missing.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

/// What currently sits at a path.
enum Existing {
    Nothing,
    Directory,
    Other,
}

/// Metadata of whatever occupies `path`. A dangling symlink still occupies
/// its path, so it is reported as the link itself.
fn entry_metadata(path: &Path) -> io::Result<fs::Metadata> {
    fs::metadata(path).or_else(|e| match e.kind() {
        io::ErrorKind::NotFound => fs::symlink_metadata(path),
        _ => Err(e),
    })
}

/// The nearest ancestor of `path` that exists but is not a directory.
fn blocking_ancestor(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .skip(1)
        .find(|a| entry_metadata(a).is_ok_and(|m| !m.is_dir()))
        .map(Path::to_path_buf)
}

fn inspect(path: &Path) -> InitResult<Existing> {
    match entry_metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(Existing::Directory),
        Ok(_) => Ok(Existing::Other),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Existing::Nothing),
        Err(e) if e.kind() == io::ErrorKind::NotADirectory => match blocking_ancestor(path) {
            Some(blocker) => Err(ApplicationError::NotADirectory { path: blocker }.into()),
            None => Err(ApplicationError::storage(path, "inspect", e).into()),
        },
        Err(e) => Err(ApplicationError::storage(path, "inspect", e).into()),
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        entry_metadata(path).is_ok()
    }

    #[instrument(level = "trace", skip(self), fields(path = %path.display()))]
    fn create_directory(&self, path: &Path, mode: FileMode) -> InitResult<WriteOutcome> {
        match inspect(path)? {
            Existing::Directory => return Ok(WriteOutcome::Skipped),
            Existing::Other => {
                return Err(ApplicationError::NotADirectory {
                    path: path.to_path_buf(),
                }
                .into());
            }
            Existing::Nothing => {}
        }

        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode.bits());
        }
        builder
            .create(path)
            .map_err(|e| ApplicationError::storage(path, "create directory", e))?;

        debug!(path = %path.display(), mode = %mode, "Directory created");
        Ok(WriteOutcome::Created)
    }

    #[instrument(level = "trace", skip(self, content), fields(path = %path.display()))]
    fn create_file(
        &self,
        path: &Path,
        content: &[u8],
        mode: FileMode,
    ) -> InitResult<WriteOutcome> {
        match inspect(path)? {
            Existing::Directory => {
                return Err(ApplicationError::IsADirectory {
                    path: path.to_path_buf(),
                }
                .into());
            }
            Existing::Other => return Ok(WriteOutcome::Skipped),
            Existing::Nothing => {}
        }

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        self.create_directory(parent, FileMode::DIRECTORY)?;

        let mut staged = NamedTempFile::new_in(parent)
            .map_err(|e| ApplicationError::storage(path, "stage file", e))?;
        staged
            .write_all(content)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| ApplicationError::storage(path, "write file", e))?;
        set_mode(staged.as_file(), mode)
            .map_err(|e| ApplicationError::storage(path, "set permissions on", e))?;

        match staged.persist_noclobber(path) {
            Ok(_) => {}
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "File appeared concurrently, left untouched");
                return Ok(WriteOutcome::Skipped);
            }
            Err(e) => return Err(ApplicationError::storage(path, "write file", e.error).into()),
        }

        debug!(path = %path.display(), mode = %mode, bytes = content.len(), "File created");
        Ok(WriteOutcome::Created)
    }

    fn stat(&self, path: &Path) -> InitResult<FileStat> {
        let meta = entry_metadata(path).map_err(|e| ApplicationError::storage(path, "stat", e))?;
        if meta.is_dir() {
            Ok(FileStat::directory())
        } else {
            Ok(FileStat::file(meta.len()))
        }
    }

    fn walk(&self, root: &Path) -> InitResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let at = e.path().unwrap_or(root).to_path_buf();
                ApplicationError::storage(&at, "walk", e.into())
            })?;
            paths.push(entry.into_path());
        }
        Ok(paths)
    }
}

#[cfg(unix)]
fn set_mode(file: &fs::File, mode: FileMode) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode.bits()))
}

#[cfg(not(unix))]
fn set_mode(_file: &fs::File, _mode: FileMode) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_init_core::error::InitError;
    use tempfile::tempdir;

    #[test]
    fn create_file_writes_content_and_parents() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("dir").join("a.md");
        let fs = LocalFilesystem::new();

        fs.create_file(&file, b"hello", FileMode::DATA).unwrap();

        assert_eq!(std::fs::read(&file).unwrap(), b"hello");
        assert!(fs.stat(&file.parent().unwrap()).unwrap().is_dir());
    }

    #[test]
    fn create_file_leaves_existing_file_alone() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("settings.json");
        std::fs::write(&file, "mine").unwrap();

        let outcome = LocalFilesystem::new()
            .create_file(&file, b"theirs", FileMode::DATA)
            .unwrap();

        assert_eq!(outcome, WriteOutcome::Skipped);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "mine");
    }

    #[test]
    fn create_file_over_directory_is_a_conflict() {
        let dir = tempdir().unwrap();
        let err = LocalFilesystem::new()
            .create_file(dir.path(), b"x", FileMode::DATA)
            .unwrap_err();
        assert!(matches!(
            err,
            InitError::Application(ApplicationError::IsADirectory { .. })
        ));
    }

    #[test]
    fn create_directory_over_file_is_a_conflict() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("commands");
        std::fs::write(&file, "").unwrap();

        let err = LocalFilesystem::new()
            .create_directory(&file, FileMode::DIRECTORY)
            .unwrap_err();
        assert!(matches!(
            err,
            InitError::Application(ApplicationError::NotADirectory { .. })
        ));
    }

    #[test]
    fn create_directory_is_idempotent() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("a").join("b");
        let fs = LocalFilesystem::new();
        assert_eq!(
            fs.create_directory(&sub, FileMode::DIRECTORY).unwrap(),
            WriteOutcome::Created
        );
        assert_eq!(
            fs.create_directory(&sub, FileMode::DIRECTORY).unwrap(),
            WriteOutcome::Skipped
        );
        assert!(sub.is_dir());
    }

    #[test]
    fn file_under_a_file_names_the_blocking_parent() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("commands");
        std::fs::write(&blocker, "").unwrap();
        let fs = LocalFilesystem::new();
        let child = blocker.join("ask.md");

        assert!(!fs.exists(&child));
        let err = fs.create_file(&child, b"x", FileMode::DATA).unwrap_err();
        match err {
            InitError::Application(ApplicationError::NotADirectory { path }) => {
                assert_eq!(path, blocker)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_an_existing_entry() {
        let dir = tempdir().unwrap();
        let link = dir.path().join("settings.json");
        std::os::unix::fs::symlink(dir.path().join("nowhere"), &link).unwrap();
        let fs = LocalFilesystem::new();

        assert!(fs.exists(&link));
        assert!(!fs.stat(&link).unwrap().is_dir());
        assert_eq!(
            fs.create_file(&link, b"{}", FileMode::DATA).unwrap(),
            WriteOutcome::Skipped
        );
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(!dir.path().join("nowhere").exists());
    }

    #[test]
    fn stat_missing_path_is_storage_error() {
        let dir = tempdir().unwrap();
        let err = LocalFilesystem::new()
            .stat(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(
            err,
            InitError::Application(ApplicationError::Storage {
                kind: io::ErrorKind::NotFound,
                ..
            })
        ));
    }

    #[test]
    fn walk_is_parent_first_and_sorted() {
        let dir = tempdir().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_file(&dir.path().join("b.md"), b"", FileMode::DATA)
            .unwrap();
        fs.create_file(&dir.path().join("a").join("z.md"), b"", FileMode::DATA)
            .unwrap();

        let walked: Vec<_> = fs
            .walk(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            walked,
            vec![
                PathBuf::from("a"),
                PathBuf::from("a").join("z.md"),
                PathBuf::from("b.md"),
            ]
        );
    }

    #[test]
    fn no_temporary_files_are_left_behind() {
        let dir = tempdir().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_file(&dir.path().join("one.md"), b"1", FileMode::DATA)
            .unwrap();
        fs.create_file(&dir.path().join("one.md"), b"2", FileMode::DATA)
            .unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn scripts_get_executable_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let script = dir.path().join("check.sh");
        LocalFilesystem::new()
            .create_file(&script, b"#!/bin/sh\n", FileMode::EXECUTABLE)
            .unwrap();

        let mode = std::fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
