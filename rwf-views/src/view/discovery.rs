//! Find templates in a source tree and sort them into layouts, partials and pages.
//!
//! The role of a template is decided by its path alone:
//!
//! | Path            | Role    |
//! |-----------------|---------|
//! | `layouts/...`   | Layout  |
//! | `partials/...`  | Partial |
//! | anything else   | Page    |
//!
//! Every template is named after its path with the file extension removed, e.g.
//! `user/list.html` is named `user/list`. Pages are rendered by that name, layouts
//! and partials are referenced by it from other templates.
use std::collections::HashMap;

use glob::Pattern;

use super::Error;
use crate::source::SourceTree;

/// Folder holding layouts.
pub const LAYOUTS: &str = "layouts/";
/// Folder holding partials.
pub const PARTIALS: &str = "partials/";

/// What a template is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Page skeleton with blocks pages fill in.
    Layout,
    /// Fragment included from other templates.
    Partial,
    /// Renderable response.
    Page,
}

impl Role {
    /// Classify a root-relative path.
    pub fn classify(path: &str) -> Role {
        if path.starts_with(LAYOUTS) {
            Role::Layout
        } else if path.starts_with(PARTIALS) {
            Role::Partial
        } else {
            Role::Page
        }
    }
}

/// A template found in the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Path relative to the source tree root.
    pub path: String,
    /// Name the template is compiled under.
    pub name: String,
    pub role: Role,
}

impl Source {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            name: template_name(path),
            role: Role::classify(path),
        }
    }
}

/// Template name for a path: the path without the file extension.
///
/// ```
/// # use rwf_views::view::discovery::template_name;
/// assert_eq!(template_name("user/list.html"), "user/list");
/// assert_eq!(template_name("errors/404.html"), "errors/404");
/// assert_eq!(template_name("emails/welcome.txt.html"), "emails/welcome.txt");
/// ```
pub fn template_name(path: &str) -> String {
    let file_start = path.rfind('/').map(|slash| slash + 1).unwrap_or(0);

    match path[file_start..].rfind('.') {
        Some(0) | None => path.to_string(),
        Some(dot) => path[..file_start + dot].to_string(),
    }
}

/// Templates found in a source tree, by role.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub layouts: Vec<Source>,
    pub partials: Vec<Source>,
    pub pages: Vec<Source>,
}

impl Discovery {
    /// Walk the source tree and classify every template matching the pattern.
    ///
    /// Fails if two paths end up with the same template name.
    pub fn discover(tree: &dyn SourceTree, pattern: &Pattern) -> Result<Self, Error> {
        let mut discovery = Discovery::default();
        let mut names: HashMap<String, String> = HashMap::new();

        for path in tree.list(pattern)? {
            let source = Source::new(&path);

            if let Some(first) = names.insert(source.name.clone(), path.clone()) {
                return Err(Error::DuplicateName {
                    name: source.name,
                    first,
                    second: path,
                });
            }

            match source.role {
                Role::Layout => discovery.layouts.push(source),
                Role::Partial => discovery.partials.push(source),
                Role::Page => discovery.pages.push(source),
            }
        }

        Ok(discovery)
    }

    /// Layouts and partials, the templates every page is compiled with.
    pub fn base(&self) -> impl Iterator<Item = &Source> {
        self.layouts.iter().chain(self.partials.iter())
    }

    /// Find a page by name.
    pub fn page(&self, name: &str) -> Option<&Source> {
        self.pages.iter().find(|page| page.name == name)
    }

    /// Names of all pages.
    pub fn page_names(&self) -> Vec<String> {
        self.pages.iter().map(|page| page.name.clone()).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::Memory;

    fn pattern() -> Pattern {
        Pattern::new("**/*.html").unwrap()
    }

    #[test]
    fn test_classify() {
        assert_eq!(Role::classify("layouts/base.html"), Role::Layout);
        assert_eq!(Role::classify("layouts/admin/base.html"), Role::Layout);
        assert_eq!(Role::classify("partials/nav.html"), Role::Partial);
        assert_eq!(Role::classify("user/list.html"), Role::Page);
        assert_eq!(Role::classify("index.html"), Role::Page);
        // Only the top-level folders count.
        assert_eq!(Role::classify("user/layouts/base.html"), Role::Page);
        assert_eq!(Role::classify("layouts.html"), Role::Page);
        assert_eq!(Role::classify("partialsnav.html"), Role::Page);
    }

    #[test]
    fn test_template_name() {
        assert_eq!(template_name("index.html"), "index");
        assert_eq!(template_name("layouts/base.html"), "layouts/base");
        assert_eq!(template_name("v1.2/notes"), "v1.2/notes");
        assert_eq!(template_name("partials/.hidden"), "partials/.hidden");
    }

    #[test]
    fn test_discover_total_and_disjoint() {
        let tree = Memory::new()
            .with("layouts/base.html", "")
            .with("partials/nav.html", "")
            .with("partials/forms/input.html", "")
            .with("user/list.html", "")
            .with("errors/404.html", "")
            .with("index.html", "")
            .with("style.css", "");

        let discovery = Discovery::discover(&tree, &pattern()).unwrap();

        let layouts = discovery.layouts.iter().map(|s| s.path.as_str()).collect::<Vec<_>>();
        let partials = discovery.partials.iter().map(|s| s.path.as_str()).collect::<Vec<_>>();

        assert_eq!(layouts, vec!["layouts/base.html"]);
        assert_eq!(partials, vec!["partials/forms/input.html", "partials/nav.html"]);
        assert_eq!(discovery.page_names(), vec!["errors/404", "index", "user/list"]);

        let total = discovery.layouts.len() + discovery.partials.len() + discovery.pages.len();
        assert_eq!(total, 6);
        assert!(discovery.page("layouts/base").is_none());
        assert!(discovery.page("user/list").is_some());
    }

    #[test]
    fn test_discover_empty() {
        let discovery = Discovery::discover(&Memory::new(), &pattern()).unwrap();

        assert!(discovery.pages.is_empty());
        assert_eq!(discovery.base().count(), 0);
    }

    #[test]
    fn test_duplicate_names() {
        let tree = Memory::new()
            .with("user/list.html", "")
            .with("user/list.htm", "");
        let pattern = Pattern::new("**/*.htm*").unwrap();

        match Discovery::discover(&tree, &pattern) {
            Err(Error::DuplicateName { name, first, second }) => {
                assert_eq!(name, "user/list");
                assert_eq!(first, "user/list.htm");
                assert_eq!(second, "user/list.html");
            }
            other => panic!("expected duplicate name error, got {:?}", other),
        }
    }
}
