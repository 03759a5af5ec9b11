//! Templates folder on disk.
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::warn;
use walkdir::WalkDir;

use super::{matches, normalize, not_found, SourceTree};

/// Template sources read from a folder on disk.
///
/// Files are read on demand, so edits made while the application is running
/// are picked up by whoever reads them next.
#[derive(Debug, Clone)]
pub struct Disk {
    root: PathBuf,
}

impl Disk {
    /// Serve templates out of this folder.
    ///
    /// The path can be relative, or absolute. Relative paths are resolved
    /// against the current working directory.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let root_path = path.as_ref();
        let root = if root_path.is_absolute() {
            root_path.to_owned()
        } else {
            std::env::current_dir()?.join(root_path)
        };

        Ok(Self { root })
    }

    /// The templates folder.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceTree for Disk {
    fn list(&self, pattern: &Pattern) -> io::Result<Vec<String>> {
        if !self.root.exists() {
            warn!("templates folder \"{}\" does not exist", self.root.display());
            return Ok(vec![]);
        }

        let root = std::fs::canonicalize(&self.root)?;
        let mut paths = vec![];

        for entry in WalkDir::new(&self.root).follow_links(true).min_depth(1) {
            let entry = entry?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(relative) => normalize(relative),
                Err(_) => continue,
            };

            if !matches(pattern, &relative) {
                continue;
            }

            // Only list what read() will agree to read.
            if !inside(&root, entry.path()) {
                warn!(
                    "skipping template \"{}\", it links outside of \"{}\"",
                    relative,
                    self.root.display()
                );
                continue;
            }

            paths.push(relative);
        }

        paths.sort();

        Ok(paths)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        let full = self.root.join(path);
        let root = std::fs::canonicalize(&self.root)?;

        // Protect against .. and symlinks going out of the root folder.
        if !inside(&root, &full) {
            return Err(not_found(path));
        }

        std::fs::read(full)
    }
}

/// The path, with symlinks and `..` resolved, is inside the canonical root.
fn inside(root: &Path, path: &Path) -> bool {
    match std::fs::canonicalize(path) {
        Ok(path) => path.starts_with(root),
        Err(_) => false,
    }
}
