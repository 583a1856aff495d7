//! Template bundle adapters.
//!
//! The `.claude` tree under `crates/cc-init-adapters/assets/` is embedded
//! into the binary at compile time via [`include_bytes!`] in [`embedded`],
//! then served through the core `AssetSource` port by [`AssetTree`].
//!
//! ## Adding a template
//!
//! 1. Create the file under `assets/.claude/`
//! 2. Add a row for it to [`embedded::FILES`]
//! 3. Build to make sure the `include_bytes!` path resolves
//!
//! Directories are never listed explicitly; [`AssetTree`] derives them from
//! the file paths.

pub mod embedded;
mod tree;

pub use tree::{AssetTree, AssetTreeError};
