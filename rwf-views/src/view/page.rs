//! Pages compiled on top of a copy of the base set.
//!
//! A page usually extends a layout and fills in its blocks:
//!
//! ```html
//! {% extends "layouts/base" %}
//! {% block title %}Users{% endblock %}
//! {% block content %}{% include "partials/user_table" %}{% endblock %}
//! ```
//!
//! Every page gets its own deep copy of the base set, so pages never see each other's
//! definitions and compiling a page never changes the base set.
use std::io::Write;

use tera::{Context, Tera};

use super::base::{read, BaseSet};
use super::discovery::Source;
use super::Error;
use crate::source::SourceTree;

/// A compiled page: the base set plus one page.
#[derive(Debug, Clone)]
pub struct PageSet {
    name: String,
    tera: Tera,
}

impl PageSet {
    /// Compile a page on top of a copy of the base set.
    pub fn compile(base: &BaseSet, tree: &dyn SourceTree, page: &Source) -> Result<Self, Error> {
        let content = read(tree, page)?;
        Self::extend(base.tera.clone(), page, &content)
    }

    /// Compile a page on top of the base set, consuming it.
    ///
    /// Used when the base set was built for this page only and a copy would be wasted.
    pub fn compile_owned(base: BaseSet, tree: &dyn SourceTree, page: &Source) -> Result<Self, Error> {
        let content = read(tree, page)?;
        Self::extend(base.tera, page, &content)
    }

    fn extend(mut tera: Tera, page: &Source, content: &str) -> Result<Self, Error> {
        tera.add_raw_template(&page.name, content)
            .map_err(|error| Error::Parse {
                name: page.name.clone(),
                error,
            })?;

        Ok(Self {
            name: page.name.clone(),
            tera,
        })
    }

    /// Page name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A template with this name is part of the set.
    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|template| template == name)
    }

    /// Render the page, streaming output into the writer as it's produced.
    ///
    /// Nothing already written is taken back if rendering fails halfway.
    pub fn render(&self, context: &Context, output: impl Write) -> Result<(), Error> {
        self.tera
            .render_to(&self.name, context, output)
            .map_err(|error| Error::Execution {
                name: self.name.clone(),
                error,
            })
    }

    /// Render the page into a string.
    pub fn render_to_string(&self, context: &Context) -> Result<String, Error> {
        self.tera
            .render(&self.name, context)
            .map_err(|error| Error::Execution {
                name: self.name.clone(),
                error,
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::Memory;
    use crate::view::base::Compiler;
    use crate::view::discovery::Discovery;
    use glob::Pattern;

    const LAYOUT: &str = r#"<html><title>{% block title %}Default{% endblock %}</title>{% block content %}{% endblock %}</html>"#;

    fn tree() -> Memory {
        Memory::new()
            .with("layouts/base.html", LAYOUT)
            .with("partials/greeting.html", "Hello, {{ name }}!")
            .with(
                "user/list.html",
                r#"{% extends "layouts/base" %}
{% block title %}Users{% endblock %}
{% block content %}<h1>User List</h1>{% endblock %}"#,
            )
            .with(
                "index.html",
                r#"{% extends "layouts/base" %}{% block content %}{% include "partials/greeting" %}{% endblock %}"#,
            )
            .with("broken.html", "{% if %}")
    }

    fn compile(tree: &Memory, name: &str) -> Result<PageSet, Error> {
        let discovery = Discovery::discover(tree, &Pattern::new("**/*.html").unwrap()).unwrap();
        let base = Compiler::default().base(tree, &discovery).unwrap();
        PageSet::compile(&base, tree, discovery.page(name).unwrap())
    }

    #[test]
    fn test_layout_blocks() {
        let page = compile(&tree(), "user/list").unwrap();

        assert_eq!(page.name(), "user/list");
        assert_eq!(
            page.render_to_string(&Context::new()).unwrap(),
            "<html><title>Users</title><h1>User List</h1></html>"
        );
    }

    #[test]
    fn test_default_block_and_partial() {
        let page = compile(&tree(), "index").unwrap();

        let mut context = Context::new();
        context.insert("name", "Alice");

        assert_eq!(
            page.render_to_string(&context).unwrap(),
            "<html><title>Default</title>Hello, Alice!</html>"
        );
    }

    #[test]
    fn test_pages_are_isolated() {
        let tree = tree();
        let discovery = Discovery::discover(&tree, &Pattern::new("**/*.html").unwrap()).unwrap();
        let base = Compiler::default().base(&tree, &discovery).unwrap();

        let list = PageSet::compile(&base, &tree, discovery.page("user/list").unwrap()).unwrap();
        let index = PageSet::compile(&base, &tree, discovery.page("index").unwrap()).unwrap();

        assert!(list.contains("user/list"));
        assert!(!list.contains("index"));
        assert!(index.contains("index"));
        assert!(!index.contains("user/list"));
        assert!(!base.contains("user/list"));
        assert!(!base.contains("index"));
    }

    #[test]
    fn test_syntax_error() {
        match compile(&tree(), "broken") {
            Err(Error::Parse { name, .. }) => assert_eq!(name, "broken"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_output_kept() {
        let tree = Memory::new().with("strict.html", "before {{ missing }} after");
        let page = compile(&tree, "strict").unwrap();

        let mut output = vec![];
        let err = page.render(&Context::new(), &mut output).expect_err("missing variable");

        assert!(matches!(err, Error::Execution { .. }));
        assert!(String::from_utf8(output).unwrap().starts_with("before"));
    }
}
