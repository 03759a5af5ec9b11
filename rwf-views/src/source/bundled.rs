//! Templates compiled into the binary.
use std::io;

use glob::Pattern;

use super::{matches, normalize, not_found, SourceTree};

/// Template sources bundled into the binary, usually with `include_str!`.
///
/// # Example
///
/// ```
/// use rwf_views::source::Bundled;
///
/// static TEMPLATES: Bundled = Bundled::new(&[
///     ("layouts/base.html", "<html>{% block body %}{% endblock %}</html>"),
///     ("index.html", "{% extends \"layouts/base\" %}"),
/// ]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bundled {
    files: &'static [(&'static str, &'static str)],
}

impl Bundled {
    /// Bundle these `(path, content)` pairs.
    pub const fn new(files: &'static [(&'static str, &'static str)]) -> Self {
        Self { files }
    }
}

impl SourceTree for Bundled {
    fn list(&self, pattern: &Pattern) -> io::Result<Vec<String>> {
        let mut paths = self
            .files
            .iter()
            .map(|(path, _)| normalize(path))
            .filter(|path| matches(pattern, path))
            .collect::<Vec<_>>();
        paths.sort();

        Ok(paths)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .iter()
            .find(|(bundled, _)| normalize(bundled) == path)
            .map(|(_, content)| content.as_bytes().to_vec())
            .ok_or_else(|| not_found(path))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static TREE: Bundled = Bundled::new(&[
        ("partials\\nav.html", "<nav></nav>"),
        ("index.html", "index"),
    ]);

    #[test]
    fn test_bundled() {
        let pattern = Pattern::new("**/*.html").unwrap();

        assert_eq!(
            TREE.list(&pattern).unwrap(),
            vec!["index.html", "partials/nav.html"]
        );
        assert_eq!(TREE.read("partials/nav.html").unwrap(), b"<nav></nav>".to_vec());
        assert!(TREE.read("missing.html").is_err());
    }
}
