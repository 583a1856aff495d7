//! In-memory template tree serving the `AssetSource` port.

use std::borrow::Cow;
use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use cc_init_core::application::ports::{AssetNode, AssetSource};
use cc_init_core::domain::EntryKind;

use super::embedded;

/// Problems building a tree from a flat list of files.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetTreeError {
    #[error("Empty path in template bundle")]
    EmptyPath,

    #[error("Template {path} is listed twice")]
    Duplicate { path: String },

    #[error("Template {path} is a file but other templates live below it")]
    FileAsDirectory { path: String },
}

#[derive(Debug, Clone)]
enum Node {
    Directory,
    File(Cow<'static, [u8]>),
}

/// Read-only hierarchical template bundle.
///
/// Keys are path segments, so iteration is parent-first with siblings in
/// byte order. Parent directories are created implicitly when a file is
/// inserted.
#[derive(Debug, Clone, Default)]
pub struct AssetTree {
    nodes: BTreeMap<Vec<String>, Node>,
}

impl AssetTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `.claude` tree shipped inside the binary.
    pub fn builtin() -> Result<Self, AssetTreeError> {
        let tree = Self::from_files(
            embedded::FILES
                .iter()
                .map(|(path, content)| (*path, Cow::Borrowed(*content))),
        )?;
        debug!(files = tree.file_count(), nodes = tree.len(), "Loaded embedded templates");
        Ok(tree)
    }

    /// Build a tree from `(bundle path, content)` pairs.
    pub fn from_files<I, P, C>(files: I) -> Result<Self, AssetTreeError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<Cow<'static, [u8]>>,
    {
        let mut tree = Self::new();
        for (path, content) in files {
            tree.insert_file(path.as_ref(), content)?;
        }
        Ok(tree)
    }

    /// Add a file, creating any missing parent directories.
    pub fn insert_file(
        &mut self,
        path: &str,
        content: impl Into<Cow<'static, [u8]>>,
    ) -> Result<(), AssetTreeError> {
        let key = split(path);
        if key.is_empty() {
            return Err(AssetTreeError::EmptyPath);
        }
        self.insert_parents(&key)?;
        if self.nodes.contains_key(&key) {
            return Err(AssetTreeError::Duplicate { path: key.join("/") });
        }
        self.nodes.insert(key, Node::File(content.into()));
        Ok(())
    }

    /// Add an empty directory, creating any missing parents.
    pub fn insert_dir(&mut self, path: &str) -> Result<(), AssetTreeError> {
        let key = split(path);
        if key.is_empty() {
            return Err(AssetTreeError::EmptyPath);
        }
        self.insert_parents(&key)?;
        match self.nodes.get(&key) {
            Some(Node::File(_)) => Err(AssetTreeError::FileAsDirectory { path: key.join("/") }),
            Some(Node::Directory) => Ok(()),
            None => {
                self.nodes.insert(key, Node::Directory);
                Ok(())
            }
        }
    }

    /// Number of nodes, directories included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|node| matches!(node, Node::File(_)))
            .count()
    }

    fn insert_parents(&mut self, key: &[String]) -> Result<(), AssetTreeError> {
        for depth in 1..key.len() {
            let parent = &key[..depth];
            match self.nodes.get(parent) {
                Some(Node::File(_)) => {
                    return Err(AssetTreeError::FileAsDirectory {
                        path: parent.join("/"),
                    });
                }
                Some(Node::Directory) => {}
                None => {
                    self.nodes.insert(parent.to_vec(), Node::Directory);
                }
            }
        }
        Ok(())
    }
}

impl AssetSource for AssetTree {
    fn nodes(&self) -> Box<dyn Iterator<Item = AssetNode> + '_> {
        Box::new(self.nodes.iter().map(|(key, node)| {
            let kind = match node {
                Node::Directory => EntryKind::Directory,
                Node::File(_) => EntryKind::File,
            };
            AssetNode::new(key.join("/"), kind)
        }))
    }

    fn read(&self, path: &str) -> Option<Vec<u8>> {
        match self.nodes.get(&split(path))? {
            Node::File(content) => Some(content.to_vec()),
            Node::Directory => None,
        }
    }
}

/// Slash-separated path to segments, ignoring empty ones.
fn split(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
