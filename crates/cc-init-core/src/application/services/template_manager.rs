//! Template Manager - read access to the bundled template tree.
//!
//! Strips the bundle root from every node so callers only ever see
//! destination-relative paths, and turns raw node paths into validated
//! [`RelativePath`]s before anything else touches them.

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::AssetSource},
    domain::{AssetEntry, DomainValidator as validator, EntryKind, FileMode, RelativePath},
    error::{InitError, InitResult},
};

/// Walks and reads the template bundle below a fixed root prefix.
pub struct TemplateManager {
    source: Box<dyn AssetSource>,
    prefix: String,
}

impl TemplateManager {
    /// Create a manager over `source`, exposing only nodes under `prefix`.
    pub fn new(source: Box<dyn AssetSource>, prefix: impl Into<String>) -> Self {
        Self {
            source,
            prefix: prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `true` if at least one node lives below the prefix.
    pub fn has_templates(&self) -> bool {
        self.source
            .nodes()
            .any(|node| self.strip_prefix(&node.path).is_some())
    }

    /// Lazily walk the bundle, parent-first.
    ///
    /// Each item is validated on the way out; an unsafe path shows up as an
    /// `Err` item and the caller decides whether to stop.
    pub fn entries(&self) -> impl Iterator<Item = InitResult<AssetEntry>> + '_ {
        self.source.nodes().filter_map(move |node| {
            let relative = self.strip_prefix(&node.path)?;
            Some(
                validator::validate_asset_path(relative)
                    .map(|path| AssetEntry::new(path, node.kind))
                    .map_err(InitError::from),
            )
        })
    }

    /// Relative paths of every file template.
    pub fn list_templates(&self) -> InitResult<Vec<RelativePath>> {
        self.entries()
            .filter(|entry| !matches!(entry, Ok(e) if e.is_dir()))
            .map(|entry| entry.map(|e| e.path().clone()))
            .collect()
    }

    /// Body of a file template.
    #[instrument(skip(self), fields(path = %path))]
    pub fn read_file(&self, path: &RelativePath) -> InitResult<Vec<u8>> {
        let full = self.full_path(path);
        let content = self.source.read(&full).ok_or_else(|| ApplicationError::AssetRead {
            path: full.clone(),
            reason: "no such file in bundle".into(),
        })?;
        debug!(bytes = content.len(), "Template read");
        Ok(content)
    }

    /// Permission bits for a path of the given kind.
    pub fn default_mode(&self, path: &RelativePath, kind: EntryKind) -> FileMode {
        FileMode::for_entry(path, kind)
    }

    fn full_path(&self, path: &RelativePath) -> String {
        if self.prefix.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.prefix, path)
        }
    }

    /// Relative part of `full`, or `None` for the root itself and for nodes
    /// outside the prefix.
    fn strip_prefix<'a>(&self, full: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            return Some(full).filter(|p| !p.is_empty());
        }
        full.strip_prefix(self.prefix.as_str())?
            .strip_prefix('/')
            .filter(|rest| !rest.is_empty())
    }
}
