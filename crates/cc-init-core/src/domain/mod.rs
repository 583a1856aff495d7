// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for cc-init.
//!
//! This module contains pure logic with no I/O. Reading the bundle and
//! touching the host filesystem are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Path checks are lexical, never `canonicalize`
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod entities;
pub mod error;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    asset::AssetEntry,
    common::{EntryKind, FileMode, FileStat, RelativePath},
    layout::DeploymentLayout,
};

pub use error::DomainError;

pub use validation::DomainValidator;
