//! Command handlers. Each module owns one subcommand (or the default deploy).

pub mod completions;
pub mod config;
pub mod deploy;
pub mod list;

use cc_init_adapters::AssetTree;
use cc_init_core::error::InitError;

use crate::error::{CliError, CliResult};

/// The embedded `.claude` bundle.
///
/// A malformed bundle is a build defect, so it surfaces as an internal error.
pub(crate) fn builtin_templates() -> CliResult<AssetTree> {
    AssetTree::builtin().map_err(|e| {
        CliError::Core(InitError::Internal {
            message: format!("embedded template bundle is malformed: {e}"),
        })
    })
}
