//! Error handling for the cc-init CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;
use std::io;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use cc_init_core::error::InitError;

// Re-export so callers only need `use crate::error::*`.
pub use cc_init_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    // ── Target errors ──────────────────────────────────────────────────────
    /// The target directory does not exist.
    #[error("Target directory does not exist: {}", path.display())]
    TargetNotFound { path: PathBuf },

    /// The target path exists but is not a directory.
    #[error("Target path is not a directory: {}", path.display())]
    TargetNotDirectory { path: PathBuf },

    /// A test file could not be created in the target directory.
    #[error("Target directory is not writable: {}", path.display())]
    TargetNotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The target path could not be resolved or inspected.
    #[error("Invalid target directory: {}", path.display())]
    InvalidTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or rendered.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `cc-init-core` that aborted the run.
    #[error("Initialization failed: {0}")]
    Core(#[from] InitError),

    /// The run finished but some entries could not be processed.
    #[error("Initialization completed with {count} error(s)")]
    CompletedWithErrors { count: usize },

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::IoError {
            message: format!("Failed to render JSON: {err}"),
            source: err.into(),
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TargetNotFound { path } => vec![
                format!("Create it first: mkdir -p {}", path.display()),
                "Or pass an existing directory with --target".into(),
            ],

            Self::TargetNotDirectory { path } => vec![
                format!("'{}' is a file", path.display()),
                "Pass the project directory, not a file inside it".into(),
            ],

            Self::TargetNotWritable { path, .. } => vec![
                format!("Check the permissions of '{}'", path.display()),
                "Use --dry-run to preview without writing".into(),
            ],

            Self::InvalidTarget { .. } => vec![
                "Check that the path is spelled correctly".into(),
                "Use --help for usage information".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Run 'cc-init config path' to locate the config file".into(),
                "Run 'cc-init config list' to see the effective values".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::CompletedWithErrors { .. } => vec![
                "Entries that failed were left untouched; the rest were deployed".into(),
                "Re-run with -v to see every error".into(),
                "Fix the conflicting paths and run cc-init again".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TargetNotFound { .. } => ErrorCategory::NotFound,
            Self::TargetNotDirectory { .. } => ErrorCategory::UserError,
            Self::TargetNotWritable { .. } => ErrorCategory::UserError,
            Self::InvalidTarget { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Storage | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::CompletedWithErrors { .. } => ErrorCategory::Internal,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (bad target, conflicting bundle entries).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}
