// ============================================================================
// domain/error.rs - STRUCTURAL RULE VIOLATIONS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// Domain errors mean the asset bundle or the destination layout broke one
/// of the path invariants. They are never produced by ordinary runtime
/// conditions on the host filesystem.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// An asset path is absolute, empty, or walks upwards.
    #[error("Unsafe asset path '{path}': {reason}")]
    UnsafeAssetPath { path: String, reason: &'static str },

    /// A destination path would land outside the target root.
    #[error("Path '{path}' escapes target root {}", root.display())]
    PathEscape { path: String, root: PathBuf },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsafeAssetPath { path, .. } => vec![
                format!("The bundled template '{}' has an invalid path", path),
                "The template bundle is corrupted or was built incorrectly".into(),
                "Please report this issue or reinstall cc-init".into(),
            ],
            Self::PathEscape { path, root } => vec![
                format!(
                    "Refusing to write '{}' outside of {}",
                    path,
                    root.display()
                ),
                "The run was aborted before processing further templates".into(),
                "Please report this issue".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsafeAssetPath { .. } => ErrorCategory::Validation,
            Self::PathEscape { .. } => ErrorCategory::Internal,
        }
    }
}
