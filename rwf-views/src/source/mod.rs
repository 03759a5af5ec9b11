//! Template source trees.
//!
//! A source tree is a path-addressed, read-only store of template files. Paths are
//! relative to the tree root and always use `/` as the separator, regardless of
//! the platform the files came from.
//!
//! Three trees are provided:
//!
//! - [`Disk`], a folder on the filesystem,
//! - [`Bundled`], files compiled into the binary with `include_str!`,
//! - [`Memory`], a map of paths to contents, editable at runtime.
use std::io;
use std::path::{Component, Path};
use std::sync::Arc;

use glob::{MatchOptions, Pattern};

pub mod bundled;
pub mod disk;
pub mod memory;

pub use bundled::Bundled;
pub use disk::Disk;
pub use memory::Memory;

/// A store of template sources.
pub trait SourceTree: Send + Sync {
    /// List root-relative paths of all sources matching the pattern, sorted.
    fn list(&self, pattern: &Pattern) -> io::Result<Vec<String>>;

    /// Read the raw contents of a source.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;
}

impl<T: SourceTree + ?Sized> SourceTree for Arc<T> {
    fn list(&self, pattern: &Pattern) -> io::Result<Vec<String>> {
        (**self).list(pattern)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}

impl<T: SourceTree + ?Sized> SourceTree for Box<T> {
    fn list(&self, pattern: &Pattern) -> io::Result<Vec<String>> {
        (**self).list(pattern)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}

/// Check a root-relative path against a pattern.
///
/// `*` doesn't cross directories, `**/` matches any number of them.
pub fn matches(pattern: &Pattern, path: &str) -> bool {
    pattern.matches_with(
        path,
        MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        },
    )
}

/// Convert a path into the `/`-separated form used by source trees.
pub fn normalize(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .components()
        .filter(|component| *component != Component::CurDir)
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .replace('\\', "/")
}

pub(crate) fn not_found(path: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("\"{}\" is not in the source tree", path),
    )
}
