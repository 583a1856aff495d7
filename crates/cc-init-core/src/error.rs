//! Unified error handling for cc-init Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for cc-init Core operations.
///
/// This enum wraps all possible errors that can occur when using the core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum InitError {
    /// Errors from the domain layer (structural rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and port failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl InitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in cc-init".into(),
                "Please report this issue at: https://github.com/cc-init/cc-init/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this error aborts a deployment run outright.
    ///
    /// Fatal errors indicate a structural problem with the bundle or the
    /// engine. Everything else is recorded against a single entry and the
    /// walk carries on.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Domain(_) | Self::Configuration { .. } | Self::Internal { .. } => true,
            Self::Application(e) => matches!(e, ApplicationError::NoTemplates { .. }),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Storage,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type InitResult<T> = Result<T, InitError>;
