use std::path::PathBuf;

use crate::domain::{
    entities::{DeploymentLayout, RelativePath},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All path checks the engine relies on go through here, not scattered
/// across services.
pub struct DomainValidator;

impl DomainValidator {
    /// Turn a raw, root-stripped bundle path into a safe relative path.
    pub fn validate_asset_path(raw: &str) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(raw)
    }

    /// Compute the destination for `relative`, refusing anything that would
    /// land outside the target root.
    pub fn validate_destination(
        layout: &DeploymentLayout,
        relative: &RelativePath,
    ) -> Result<PathBuf, DomainError> {
        layout.resolve(relative)
    }
}
