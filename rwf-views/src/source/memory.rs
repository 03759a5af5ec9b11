//! In-memory source tree.
use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

use glob::Pattern;
use parking_lot::RwLock;

use super::{matches, normalize, not_found, SourceTree};

/// Template sources kept in memory.
///
/// Clones share the same files, so a tree handed to the engine can still be
/// edited through another clone.
///
/// # Example
///
/// ```
/// use rwf_views::source::{Memory, SourceTree};
///
/// let tree = Memory::new()
///     .with("layouts/base.html", "<html>{% block body %}{% endblock %}</html>")
///     .with("index.html", "{% extends \"layouts/base\" %}");
///
/// assert_eq!(tree.read("index.html").unwrap(), b"{% extends \"layouts/base\" %}".to_vec());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Memory {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl Memory {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder-style.
    pub fn with(self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file.
    pub fn insert(&self, path: &str, content: impl Into<Vec<u8>>) {
        self.files.write().insert(normalize(path), content.into());
    }

    /// Remove a file.
    pub fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.files.write().remove(&normalize(path))
    }

    /// Number of files in the tree.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// The tree has no files.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

impl<P: AsRef<str>, C: Into<Vec<u8>>> FromIterator<(P, C)> for Memory {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let tree = Memory::new();
        for (path, content) in iter {
            tree.insert(path.as_ref(), content);
        }
        tree
    }
}

impl SourceTree for Memory {
    fn list(&self, pattern: &Pattern) -> io::Result<Vec<String>> {
        // BTreeMap keeps the paths sorted.
        Ok(self
            .files
            .read()
            .keys()
            .filter(|path| matches(pattern, path))
            .cloned()
            .collect())
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }
}
