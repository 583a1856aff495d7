use crate::domain::entities::common::{EntryKind, RelativePath};

/// One node of the template bundle, with the bundle root already stripped.
///
/// Content is not carried here; file bodies are read on demand through the
/// template manager so a walk never holds the whole bundle in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    path: RelativePath,
    kind: EntryKind,
}

impl AssetEntry {
    pub fn new(path: RelativePath, kind: EntryKind) -> Self {
        Self { path, kind }
    }

    pub fn file(path: impl Into<RelativePath>) -> Self {
        Self::new(path.into(), EntryKind::File)
    }

    pub fn directory(path: impl Into<RelativePath>) -> Self {
        Self::new(path.into(), EntryKind::Directory)
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_directory()
    }
}
