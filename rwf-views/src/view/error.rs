//! Errors raised while compiling and rendering views.
use std::io;
use thiserror::Error;

/// Name used in errors raised while compiling layouts and partials together.
pub const BASE_SET: &str = "layouts & partials";

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read template \"{path}\": {source}")]
    SourceRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("syntax error in \"{name}\": {}", pretty(.error))]
    Parse { name: String, error: tera::Error },

    #[error("template \"{0}\" does not exist")]
    NotFound(String),

    #[error("failed to render \"{name}\": {}", pretty(.error))]
    Execution { name: String, error: tera::Error },

    #[error("templates \"{first}\" and \"{second}\" are both named \"{name}\"")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    #[error("function \"{0}\" can't be registered: {1}")]
    Function(String, &'static str),

    #[error("template pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// The requested page has no compiled template.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// The error happened while reading or compiling templates,
    /// before anything was rendered.
    pub fn is_compile(&self) -> bool {
        matches!(
            self,
            Error::SourceRead { .. }
                | Error::Parse { .. }
                | Error::DuplicateName { .. }
                | Error::Io(_)
        )
    }
}

/// Tera keeps the useful part of its errors (line, column, which variable is missing)
/// in the error's sources. Print all of them, one per line.
pub fn pretty(error: &tera::Error) -> String {
    let prefix = "---> ";
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);

    while let Some(cause) = source {
        message.push('\n');
        message.push_str(prefix);
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
