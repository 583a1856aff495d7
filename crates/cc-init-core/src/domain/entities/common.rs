use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::DomainError;

/// A slash-separated asset path guaranteed to be **relative** and
/// **non-escaping**.
///
/// Invariant: never absolute, never empty, never contains a `..` segment.
/// Enforced at construction, so any `RelativePath` joined onto a directory
/// stays inside that directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the path is unsafe (use `try_new` for fallible).
    pub fn new(path: impl AsRef<str>) -> Self {
        match Self::try_new(path) {
            Ok(p) => p,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible constructor.
    ///
    /// `.` and empty segments are dropped, so `commands//./ask.md` becomes
    /// `commands/ask.md`.
    pub fn try_new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = path.as_ref();
        let unsafe_path = |reason| DomainError::UnsafeAssetPath {
            path: raw.to_string(),
            reason,
        };

        if raw.starts_with('/') || raw.starts_with('\\') {
            return Err(unsafe_path("absolute paths are not allowed"));
        }
        if raw.contains('\0') {
            return Err(unsafe_path("path contains a NUL byte"));
        }

        let mut segments = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(unsafe_path("parent-directory segments are not allowed")),
                s if s.contains('\\') => {
                    return Err(unsafe_path("backslash separators are not allowed"));
                }
                s if segments.is_empty() && s.len() >= 2 && s.as_bytes()[1] == b':' => {
                    return Err(unsafe_path("drive prefixes are not allowed"));
                }
                s => segments.push(s),
            }
        }

        if segments.is_empty() {
            return Err(unsafe_path("path is empty"));
        }

        Ok(Self(segments.join("/")))
    }

    /// Join a segment, maintaining the invariant.
    pub fn join(&self, segment: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::try_new(format!("{}/{}", self.0, segment.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Last segment of the path.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Number of segments; `commands/ask.md` has depth 2.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Native path built from the segments.
    pub fn to_path_buf(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an asset entry (or an existing destination path) is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }

    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unix permission bits applied to created entries.
///
/// On platforms without Unix permissions the value is carried but ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    /// Regular data files: `rw-r--r--`.
    pub const DATA: Self = Self(0o644);
    /// Scripts: `rwxr-xr-x`.
    pub const EXECUTABLE: Self = Self(0o755);
    /// Directories: `rwxr-xr-x`.
    pub const DIRECTORY: Self = Self(0o755);

    /// File suffixes that are deployed as executable.
    pub const EXECUTABLE_SUFFIXES: &'static [&'static str] = &[".sh", ".bash"];

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & 0o7777)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn is_executable(&self) -> bool {
        self.0 & 0o111 != 0
    }

    /// Default mode for an entry, derived from its name alone.
    pub fn for_entry(path: &RelativePath, kind: EntryKind) -> Self {
        match kind {
            EntryKind::Directory => Self::DIRECTORY,
            EntryKind::File => {
                let name = path.file_name();
                if Self::EXECUTABLE_SUFFIXES
                    .iter()
                    .any(|suffix| name.ends_with(suffix))
                {
                    Self::EXECUTABLE
                } else {
                    Self::DATA
                }
            }
        }
    }
}

impl Default for FileMode {
    fn default() -> Self {
        Self::DATA
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// Metadata reported by the filesystem port for an existing path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub kind: EntryKind,
    pub len: u64,
}

impl FileStat {
    pub const fn directory() -> Self {
        Self {
            kind: EntryKind::Directory,
            len: 0,
        }
    }

    pub const fn file(len: u64) -> Self {
        Self {
            kind: EntryKind::File,
            len,
        }
    }

    pub const fn is_dir(&self) -> bool {
        self.kind.is_directory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------------
    // RelativePath
    // ---------------------------------------------------------------------

    #[test]
    fn relative_path_accepts_relative() {
        let p = RelativePath::new("commands/ask.md");
        assert_eq!(p.as_str(), "commands/ask.md");
        assert_eq!(p.file_name(), "ask.md");
        assert_eq!(p.depth(), 2);
    }

    #[test]
    fn relative_path_normalises_dot_and_empty_segments() {
        let p = RelativePath::new("./commands//ask.md");
        assert_eq!(p.as_str(), "commands/ask.md");
    }

    #[test]
    #[should_panic]
    fn relative_path_rejects_absolute() {
        RelativePath::new("/etc/passwd");
    }

    #[test]
    fn try_new_rejects_parent_traversal() {
        for raw in ["..", "../x", "commands/../../x", "a/.."] {
            let err = RelativePath::try_new(raw).unwrap_err();
            assert!(
                matches!(err, DomainError::UnsafeAssetPath { .. }),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn try_new_rejects_windows_style_escapes() {
        assert!(RelativePath::try_new("C:/Windows").is_err());
        assert!(RelativePath::try_new("\\\\server\\share").is_err());
        assert!(RelativePath::try_new("a\\..\\..\\b").is_err());
    }

    #[test]
    fn try_new_rejects_empty() {
        assert!(RelativePath::try_new("").is_err());
        assert!(RelativePath::try_new("./.").is_err());
    }

    #[test]
    fn dotted_names_are_not_traversal() {
        assert!(RelativePath::try_new("..hidden").is_ok());
        assert!(RelativePath::try_new("a/...").is_ok());
    }

    #[test]
    fn join_relative_path() {
        let base = RelativePath::new("commands");
        let joined = base.join("ask.md").unwrap();
        assert_eq!(joined.as_str(), "commands/ask.md");
        assert!(base.join("../../x").is_err());
    }

    #[test]
    fn to_path_buf_uses_native_separators() {
        let p = RelativePath::new("hooks/pre.sh");
        assert_eq!(p.to_path_buf(), PathBuf::from("hooks").join("pre.sh"));
    }

    // ---------------------------------------------------------------------
    // FileMode
    // ---------------------------------------------------------------------

    #[test]
    fn scripts_are_executable() {
        let sh = FileMode::for_entry(&RelativePath::new("hooks/format.sh"), EntryKind::File);
        let bash = FileMode::for_entry(&RelativePath::new("hooks/lint.bash"), EntryKind::File);
        assert_eq!(sh, FileMode::EXECUTABLE);
        assert_eq!(bash, FileMode::EXECUTABLE);
        assert!(sh.is_executable());
    }

    #[test]
    fn data_files_are_not_executable() {
        let mode = FileMode::for_entry(&RelativePath::new("settings.json"), EntryKind::File);
        assert_eq!(mode, FileMode::DATA);
        assert!(!mode.is_executable());
        // Suffix must be on the file name, not a directory.
        let mode = FileMode::for_entry(&RelativePath::new("x.sh/readme.md"), EntryKind::File);
        assert_eq!(mode, FileMode::DATA);
    }

    #[test]
    fn directories_get_directory_mode() {
        let mode = FileMode::for_entry(&RelativePath::new("hooks.sh"), EntryKind::Directory);
        assert_eq!(mode, FileMode::DIRECTORY);
    }

    #[test]
    fn mode_displays_as_octal() {
        assert_eq!(FileMode::DATA.to_string(), "0644");
        assert_eq!(FileMode::from_bits(0o100755).to_string(), "0755");
    }
}
