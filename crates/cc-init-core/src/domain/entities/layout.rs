use std::path::{Component, Path, PathBuf};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Maps asset paths onto the host filesystem.
///
/// Every destination is `<target_root>/<subtree>/<relative path>` and must
/// lexically resolve strictly inside `target_root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentLayout {
    target_root: PathBuf,
    subtree: RelativePath,
}

impl DeploymentLayout {
    pub fn new(target_root: impl Into<PathBuf>, subtree: RelativePath) -> Self {
        Self {
            target_root: target_root.into(),
            subtree,
        }
    }

    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    pub fn subtree(&self) -> &RelativePath {
        &self.subtree
    }

    /// `<target_root>/<subtree>`.
    pub fn subtree_root(&self) -> PathBuf {
        self.target_root.join(self.subtree.to_path_buf())
    }

    /// Destination path for an asset entry.
    pub fn resolve(&self, relative: &RelativePath) -> Result<PathBuf, DomainError> {
        let candidate = self.subtree_root().join(relative.to_path_buf());
        self.contain(&candidate).map_err(|_| DomainError::PathEscape {
            path: relative.to_string(),
            root: self.target_root.clone(),
        })
    }

    /// Lexically normalise `candidate` and check that it sits strictly below
    /// the target root. Returns the normalised path.
    pub fn contain(&self, candidate: &Path) -> Result<PathBuf, DomainError> {
        let escape = || DomainError::PathEscape {
            path: candidate.display().to_string(),
            root: self.target_root.clone(),
        };

        let root = normalize(&self.target_root).ok_or_else(escape)?;
        let normalized = normalize(candidate).ok_or_else(escape)?;

        if normalized != root && normalized.starts_with(&root) {
            Ok(normalized)
        } else {
            Err(escape())
        }
    }

    /// Path as shown to the user: relative to the target root when possible.
    pub fn display_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.target_root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
            _ => path.display().to_string(),
        }
    }
}

/// Resolve `.` and `..` without touching the filesystem. `None` if `..`
/// climbs above the start of the path.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    Some(out)
}
