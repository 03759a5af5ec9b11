//! Layouts and partials compiled together.
//!
//! The base set is the shared ancestor of every page. All layouts and partials are
//! parsed into one namespace, so any of them can extend, include or import any other,
//! regardless of the order the files were found in.
use std::time::Instant;

use tera::Tera;
use tracing::debug;

use super::discovery::{Discovery, Source};
use super::error::BASE_SET;
use super::{Error, Functions};
use crate::source::SourceTree;

/// Compiled layouts and partials.
#[derive(Debug, Clone)]
pub struct BaseSet {
    pub(crate) tera: Tera,
}

/// How templates are compiled.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    functions: Functions,
    autoescape: bool,
}

impl Compiler {
    /// Compile with these functions. `autoescape` escapes HTML in every
    /// `{{ expression }}` unless it's marked `| safe`.
    pub fn new(functions: Functions, autoescape: bool) -> Self {
        Self {
            functions,
            autoescape,
        }
    }

    /// Read and parse all layouts and partials found by discovery.
    ///
    /// Any read or syntax error aborts the whole set.
    pub fn base(&self, tree: &dyn SourceTree, discovery: &Discovery) -> Result<BaseSet, Error> {
        let start = Instant::now();

        let mut tera = Tera::default();
        // Template names have no file extension,
        // so escaping can't be decided by suffix.
        if self.autoescape {
            tera.autoescape_on(vec![""]);
        } else {
            tera.autoescape_on(vec![]);
        }
        self.functions.bind(&mut tera);

        let mut templates = vec![];
        for source in discovery.base() {
            templates.push((source.name.clone(), read(tree, source)?));
        }

        let count = templates.len();

        tera.add_raw_templates(templates)
            .map_err(|error| Error::Parse {
                name: BASE_SET.to_string(),
                error,
            })?;

        debug!(
            "compiled {} layouts & partials in {:.3}ms",
            count,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(BaseSet { tera })
    }
}

impl BaseSet {
    /// Names of all compiled templates.
    pub fn names(&self) -> Vec<String> {
        let mut names = self
            .tera
            .get_template_names()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    /// A template with this name was compiled.
    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|template| template == name)
    }
}

/// Read a template source as UTF-8 text.
pub(crate) fn read(tree: &dyn SourceTree, source: &Source) -> Result<String, Error> {
    let bytes = tree.read(&source.path).map_err(|err| Error::SourceRead {
        path: source.path.clone(),
        source: err,
    })?;

    String::from_utf8(bytes).map_err(|err| Error::SourceRead {
        path: source.path.clone(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
    })
}
