//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `cc-init-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `AssetSource`: The bundled template tree
//!   - `Filesystem`: Destination file operations
//!   - `Reporter`: User-facing narration
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`DeploymentEngine::run`, called by the CLI layer)

pub mod output;

pub use output::{AssetNode, AssetSource, Filesystem, Reporter, WriteOutcome};

#[cfg(test)]
pub use output::{MockFilesystem, MockReporter};
