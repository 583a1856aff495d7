//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the ports, not
//! path-rule violations. Those are `DomainError` from `crate::domain`.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The bundle has nothing under the template root.
    #[error("No template files found in embedded {root} directory")]
    NoTemplates { root: String },

    /// A template listed by the walk could not be read from the bundle.
    #[error("Failed to read embedded template {path}: {reason}")]
    AssetRead { path: String, reason: String },

    /// A directory was expected but something else occupies the path.
    #[error("Path exists but is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// A file was expected but a directory occupies the path.
    #[error("Path exists but is a directory: {}", path.display())]
    IsADirectory { path: PathBuf },

    /// The underlying storage refused an operation.
    #[error("Failed to {operation} {}: {reason}", path.display())]
    Storage {
        path: PathBuf,
        operation: &'static str,
        kind: io::ErrorKind,
        reason: String,
    },
}

impl ApplicationError {
    /// Wrap an I/O error from `operation` on `path`, keeping its kind.
    pub fn storage(path: &Path, operation: &'static str, err: io::Error) -> Self {
        Self::Storage {
            path: path.to_path_buf(),
            operation,
            kind: err.kind(),
            reason: err.to_string(),
        }
    }

    /// `true` for the two "wrong kind at path" conflicts.
    pub fn is_kind_conflict(&self) -> bool {
        matches!(self, Self::NotADirectory { .. } | Self::IsADirectory { .. })
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NoTemplates { root } => vec![
                format!("The bundled '{}' template tree is empty", root),
                "This build of cc-init is broken; reinstall it".into(),
            ],
            Self::AssetRead { path, .. } => vec![
                format!("Template '{}' is missing from the bundle", path),
                "The template bundle is corrupted; reinstall cc-init".into(),
            ],
            Self::NotADirectory { path } => vec![
                format!("Move or rename the file at {}", path.display()),
                "cc-init never replaces existing files".into(),
            ],
            Self::IsADirectory { path } => vec![
                format!("Move or rename the directory at {}", path.display()),
                "cc-init never replaces existing directories".into(),
            ],
            Self::Storage { path, kind, .. } => match kind {
                io::ErrorKind::PermissionDenied => vec![
                    format!("Permission denied: {}", path.display()),
                    "Check that you have write permissions".into(),
                ],
                _ => vec![
                    format!("Failed to access: {}", path.display()),
                    "Check available disk space and permissions".into(),
                ],
            },
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoTemplates { .. } => ErrorCategory::NotFound,
            Self::AssetRead { .. } => ErrorCategory::Internal,
            Self::NotADirectory { .. } | Self::IsADirectory { .. } => ErrorCategory::Conflict,
            Self::Storage { .. } => ErrorCategory::Storage,
        }
    }
}
