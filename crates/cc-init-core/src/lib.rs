//! cc-init Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the `cc-init`
//! template deployment tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           cc-init-cli (CLI)             │
//! │   (Validates config, renders output)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (DeploymentEngine, TemplateManager)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (AssetSource, Filesystem, Reporter)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   cc-init-adapters (Infrastructure)     │
//! │ (AssetTree, LocalFilesystem, DryRun...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (RelativePath, AssetEntry, Layout)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cc_init_core::prelude::*;
//!
//! # fn adapters() -> (Box<dyn AssetSource>, Box<dyn Filesystem>, Arc<dyn Reporter>) { todo!() }
//! let (assets, filesystem, reporter) = adapters();
//!
//! let templates = TemplateManager::new(assets, TEMPLATE_ROOT);
//! let options = DeployOptions::new("/abs/project").with_dry_run(true);
//! let engine = DeploymentEngine::new(templates, filesystem, reporter, options);
//!
//! let report = engine.run().unwrap();
//! assert!(report.is_success());
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Name of the template root inside the bundle, and of the subtree created
/// under the target directory.
pub const TEMPLATE_ROOT: &str = ".claude";

// Public API - what external crates should use
pub mod prelude {
    pub use crate::TEMPLATE_ROOT;
    pub use crate::application::{
        DeployOptions, DeploymentEngine, EntryError, RunOutcome, RunPhase, RunReport,
        RunStatistics, TemplateManager,
        ports::{AssetNode, AssetSource, Filesystem, Reporter, WriteOutcome},
    };
    pub use crate::domain::{
        AssetEntry, DeploymentLayout, EntryKind, FileMode, FileStat, RelativePath,
    };
    pub use crate::error::{InitError, InitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
