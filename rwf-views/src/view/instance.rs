//! Render instance: one page, one payload, one response.
use std::sync::Arc;

use tera::Context;

use super::{Error, PageSet};
use crate::http::{self, Output};

/// A pending render of a page with some data.
///
/// Created by [`Views::instance`](super::Views::instance) and used for exactly one
/// response. Anything that went wrong while finding or compiling the page is kept
/// here and returned by [`RenderInstance::render`].
#[derive(Debug)]
pub struct RenderInstance {
    name: String,
    data: Context,
    page: Result<Option<Arc<PageSet>>, Error>,
    content_type_written: bool,
}

impl RenderInstance {
    pub(crate) fn new(name: &str, data: Context, page: Result<Option<Arc<PageSet>>, Error>) -> Self {
        Self {
            name: name.to_string(),
            data,
            page,
            content_type_written: false,
        }
    }

    /// Name of the page being rendered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data the page will be rendered with.
    pub fn data(&self) -> &Context {
        &self.data
    }

    /// The page was found and compiled.
    pub fn is_ready(&self) -> bool {
        matches!(self.page, Ok(Some(_)))
    }

    /// The content type header was set by this instance.
    pub fn content_type_written(&self) -> bool {
        self.content_type_written
    }

    /// Set the HTML content type on the output, unless one is already set.
    pub fn write_content_type<O: Output + ?Sized>(&mut self, output: &mut O) {
        if http::write_content_type(output) {
            self.content_type_written = true;
        }
    }

    /// Render the page into the output.
    ///
    /// The content type is set first, even if rendering fails. Compilation errors and
    /// unknown pages return before any body is written. Errors while rendering are returned
    /// as-is, along with whatever was already written to the output.
    pub fn render<O: Output + ?Sized>(mut self, output: &mut O) -> Result<(), Error> {
        self.write_content_type(output);

        match self.page {
            Err(err) => Err(err),
            Ok(None) => Err(Error::NotFound(self.name)),
            Ok(Some(page)) => page.render(&self.data, output),
        }
    }
}
