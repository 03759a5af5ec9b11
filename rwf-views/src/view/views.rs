//! The view engine.
//!
//! In production (`release`), every page is compiled once when the engine is created and
//! rendering is a lookup. A template that fails to compile stops the engine from being
//! created at all, so a broken deploy fails at startup instead of on some request.
//!
//! In development (`debug`), nothing is kept: every render reads the templates again and
//! compiles the requested page from scratch, so edits show up on the next request. A broken
//! template only fails renders of pages that use it.
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use glob::Pattern;
use serde::{Deserialize, Serialize};
use tera::Context;
use tracing::{debug, error, info};

use super::base::Compiler;
use super::discovery::Discovery;
use super::{Error, Functions, PageSet, RenderInstance};
use crate::config::Config;
use crate::source::{Disk, SourceTree};

/// Default pattern for finding templates.
pub const DEFAULT_PATTERN: &str = "**/*.html";

/// How templates are compiled, chosen once when the engine is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Compile all pages once, at startup.
    Release,
    /// Compile the requested page on every render.
    Debug,
}

impl Default for Mode {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Mode::Debug;
        #[cfg(not(debug_assertions))]
        return Mode::Release;
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Release => write!(f, "release"),
            Mode::Debug => write!(f, "debug"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(Mode::Release),
            "debug" => Ok(Mode::Debug),
            other => Err(other.to_string()),
        }
    }
}

/// Compiled pages, by name. Built once, never changed.
type Registry = HashMap<String, Arc<PageSet>>;

enum State {
    Release(Registry),
    Debug,
}

/// Template engine.
///
/// Cheap to share between threads: wrap it in an [`Arc`] and hand it to every request handler.
pub struct Views {
    tree: Arc<dyn SourceTree>,
    compiler: Compiler,
    pattern: Pattern,
    globals: Context,
    state: State,
}

impl Views {
    /// Create the engine.
    ///
    /// In release mode, this compiles every page and fails if any template doesn't compile.
    /// In debug mode, this never fails.
    pub fn new(
        tree: impl SourceTree + 'static,
        functions: Functions,
        mode: Mode,
    ) -> Result<Self, Error> {
        Self::builder().functions(functions).mode(mode).build(tree)
    }

    /// Configure the engine before creating it.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Create the engine from configuration, serving templates out of the configured folder.
    pub fn from_config(config: &Config, functions: Functions) -> Result<Self, Error> {
        let tree = Disk::new(&config.templates)?;

        Self::builder()
            .functions(functions)
            .mode(config.mode)
            .autoescape(config.autoescape)
            .pattern(&config.pattern)?
            .build(tree)
    }

    /// Compilation mode.
    pub fn mode(&self) -> Mode {
        match self.state {
            State::Release(_) => Mode::Release,
            State::Debug => Mode::Debug,
        }
    }

    /// Names of all pages that can be rendered, sorted.
    pub fn pages(&self) -> Result<Vec<String>, Error> {
        let mut pages = match self.state {
            State::Release(ref registry) => registry.keys().cloned().collect(),
            State::Debug => Discovery::discover(self.tree.as_ref(), &self.pattern)?.page_names(),
        };
        pages.sort();

        Ok(pages)
    }

    /// Prepare to render a page with some data.
    ///
    /// Never fails: if the page is unknown or doesn't compile, the error is returned
    /// when rendering.
    pub fn instance(&self, name: &str, data: Context) -> RenderInstance {
        let page = match self.state {
            State::Release(ref registry) => Ok(registry.get(name).cloned()),
            State::Debug => self.recompile(name).map(|page| page.map(Arc::new)),
        };

        let mut context = self.globals.clone();
        context.extend(data);

        RenderInstance::new(name, context, page)
    }

    /// Prepare to render a page with data from any serializable struct or map.
    pub fn instance_from<T: Serialize>(&self, name: &str, data: &T) -> RenderInstance {
        match Context::from_serialize(data) {
            Ok(context) => self.instance(name, context),
            Err(error) => RenderInstance::new(
                name,
                Context::new(),
                Err(Error::Execution {
                    name: name.to_string(),
                    error,
                }),
            ),
        }
    }

    fn recompile(&self, name: &str) -> Result<Option<PageSet>, Error> {
        let start = Instant::now();
        let tree = self.tree.as_ref();

        let discovery = Discovery::discover(tree, &self.pattern)?;

        let source = match discovery.page(name) {
            Some(source) => source,
            None => return Ok(None),
        };

        let page = self
            .compiler
            .base(tree, &discovery)
            .and_then(|base| PageSet::compile_owned(base, tree, source));

        match page {
            Ok(page) => {
                debug!(
                    "compiled \"{}\" in {:.3}ms",
                    name,
                    start.elapsed().as_secs_f64() * 1000.0
                );
                Ok(Some(page))
            }

            Err(err) => {
                error!("{}", err);
                Err(err)
            }
        }
    }
}

impl fmt::Debug for Views {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Views");
        debug.field("mode", &self.mode());

        if let State::Release(ref registry) = self.state {
            debug.field("pages", &registry.len());
        }

        debug.field("compiler", &self.compiler).finish()
    }
}

/// Compile every page found in the tree.
fn compile_all(
    tree: &dyn SourceTree,
    pattern: &Pattern,
    compiler: &Compiler,
) -> Result<Registry, Error> {
    let start = Instant::now();

    let discovery = Discovery::discover(tree, pattern)?;
    let base = compiler.base(tree, &discovery)?;

    let mut registry = Registry::new();
    for source in &discovery.pages {
        let page = PageSet::compile(&base, tree, source)?;
        registry.insert(source.name.clone(), Arc::new(page));
    }

    info!(
        "compiled {} pages with {} layouts and {} partials in {:.3}ms",
        registry.len(),
        discovery.layouts.len(),
        discovery.partials.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(registry)
}

/// Engine settings.
#[derive(Debug, Clone)]
pub struct Builder {
    functions: Functions,
    mode: Mode,
    pattern: Pattern,
    autoescape: bool,
    globals: Context,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            functions: Functions::new(),
            mode: Mode::default(),
            pattern: Pattern::new(DEFAULT_PATTERN).expect("default pattern is valid"),
            autoescape: true,
            globals: Context::new(),
        }
    }
}

impl Builder {
    /// Functions and filters available to templates.
    pub fn functions(mut self, functions: Functions) -> Self {
        self.functions = functions;
        self
    }

    /// Compilation mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Only files matching this glob are templates. Defaults to `**/*.html`.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, Error> {
        self.pattern = Pattern::new(pattern)?;
        Ok(self)
    }

    /// Escape HTML in expressions. On by default.
    pub fn autoescape(mut self, autoescape: bool) -> Self {
        self.autoescape = autoescape;
        self
    }

    /// Variable available to every page. Data passed when rendering takes precedence.
    pub fn global<T: Serialize + ?Sized>(mut self, name: &str, value: &T) -> Self {
        self.globals.insert(name, value);
        self
    }

    /// Create the engine, reading templates from this tree.
    pub fn build(self, tree: impl SourceTree + 'static) -> Result<Views, Error> {
        let tree: Arc<dyn SourceTree> = Arc::new(tree);
        let compiler = Compiler::new(self.functions, self.autoescape);

        let state = match self.mode {
            Mode::Release => match compile_all(tree.as_ref(), &self.pattern, &compiler) {
                Ok(registry) => State::Release(registry),
                Err(err) => {
                    error!("{}", err);
                    return Err(err);
                }
            },

            Mode::Debug => State::Debug,
        };

        Ok(Views {
            tree,
            compiler,
            pattern: self.pattern,
            globals: self.globals,
            state,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::http::Response;
    use crate::source::Memory;

    fn tree() -> Memory {
        Memory::new()
            .with(
                "layouts/base.html",
                "<html>{% block body %}{% endblock %}</html>",
            )
            .with(
                "user/list.html",
                r#"{% extends "layouts/base" %}{% block body %}{{ site }}: {{ count }} users{% endblock %}"#,
            )
            .with("errors/404.html", "not found")
    }

    fn render(views: &Views, name: &str, data: Context) -> Result<String, Error> {
        let mut response = Response::new();
        views.instance(name, data).render(&mut response)?;
        Ok(response.text())
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("release".parse::<Mode>(), Ok(Mode::Release));
        assert_eq!("debug".parse::<Mode>(), Ok(Mode::Debug));
        assert!("turbo".parse::<Mode>().is_err());
        assert!("production".parse::<Mode>().is_err());
        assert!("Debug".parse::<Mode>().is_err());
        assert_eq!(Mode::Release.to_string(), "release");
    }

    #[test]
    fn test_release_registry() {
        let views = Views::builder()
            .mode(Mode::Release)
            .global("site", "rwf")
            .build(tree())
            .unwrap();

        assert_eq!(views.mode(), Mode::Release);
        assert_eq!(views.pages().unwrap(), vec!["errors/404", "user/list"]);

        let mut data = Context::new();
        data.insert("count", &3);
        assert_eq!(
            render(&views, "user/list", data).unwrap(),
            "<html>rwf: 3 users</html>"
        );
        assert!(render(&views, "layouts/base", Context::new())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_data_overrides_globals() {
        let views = Views::builder()
            .mode(Mode::Debug)
            .global("site", "rwf")
            .build(tree())
            .unwrap();

        let mut data = Context::new();
        data.insert("site", "acme");
        data.insert("count", &1);

        assert_eq!(
            render(&views, "user/list", data).unwrap(),
            "<html>acme: 1 users</html>"
        );
    }

    #[test]
    fn test_instance_from_struct() {
        #[derive(Serialize)]
        struct Users {
            site: &'static str,
            count: usize,
        }

        let views = Views::new(tree(), Functions::new(), Mode::Release).unwrap();
        let mut response = Response::new();

        views
            .instance_from("user/list", &Users { site: "rwf", count: 2 })
            .render(&mut response)
            .unwrap();

        assert_eq!(response.text(), "<html>rwf: 2 users</html>");
    }

    #[test]
    fn test_instance_from_non_map() {
        let views = Views::new(tree(), Functions::new(), Mode::Release).unwrap();
        let instance = views.instance_from("user/list", &vec![1, 2, 3]);

        assert!(!instance.is_ready());
        let err = instance.render(&mut Response::new()).unwrap_err();
        assert!(matches!(err, Error::Execution { .. }));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            Views::builder().pattern("**/[.html"),
            Err(Error::Pattern(_))
        ));
    }

    #[test]
    fn test_custom_pattern() {
        let tree = tree().with("emails/welcome.txt", "Welcome!");
        let views = Views::builder()
            .pattern("**/*.txt")
            .unwrap()
            .mode(Mode::Release)
            .build(tree)
            .unwrap();

        assert_eq!(views.pages().unwrap(), vec!["emails/welcome"]);
    }
}
