//! HTTP plumbing views render into: response headers and output sinks.
pub mod headers;
pub mod output;

pub use headers::Headers;
pub use output::{write_content_type, Output, Response, Stream, CONTENT_TYPE};
