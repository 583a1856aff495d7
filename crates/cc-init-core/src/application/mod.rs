//! Application layer for cc-init.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (DeploymentEngine, TemplateManager)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Report**: Run statistics and the structured run result
//! - **Errors**: Application-specific error types
//!
//! Path rules live in `crate::domain`; this layer only sequences them
//! against the ports.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

// Re-export main services
pub use services::{DeployOptions, DeploymentEngine, RunPhase, TemplateManager};

pub use report::{EntryError, RunOutcome, RunReport, RunStatistics};

// Re-export port traits (for adapter implementation)
pub use ports::{AssetNode, AssetSource, Filesystem, Reporter};

pub use error::ApplicationError;
