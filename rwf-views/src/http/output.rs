//! Destinations rendered views are written into.
//!
//! A view writes its `content-type` header first, then streams the body. [`Response`]
//! keeps both in memory, [`Stream`] passes the body straight through to any writer.
use std::io::{self, Write};

use super::Headers;

/// Content type set on every rendered view, unless one is already set.
pub const CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A destination for rendered markup: a byte sink with response headers attached.
pub trait Output: Write {
    /// Response headers.
    fn headers(&self) -> &Headers;

    /// Mutable reference to response headers.
    fn headers_mut(&mut self) -> &mut Headers;
}

/// Set the HTML content type on the output, unless a content type is already set.
///
/// Calling this multiple times is safe: the first content type set wins.
/// Returns `true` if the header was added by this call.
pub fn write_content_type<O: Output + ?Sized>(output: &mut O) -> bool {
    output
        .headers_mut()
        .insert_if_absent("content-type", CONTENT_TYPE)
}

/// Response buffered in memory.
#[derive(Debug, Default, Clone)]
pub struct Response {
    headers: Headers,
    body: Vec<u8>,
}

impl Response {
    /// Create empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Response headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Mutable reference to response headers.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Set a header, builder-style.
    pub fn header(mut self, name: impl ToString, value: impl ToString) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Body bytes written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text. Invalid UTF-8 is replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Split the response into its headers and body.
    pub fn into_parts(self) -> (Headers, Vec<u8>) {
        (self.headers, self.body)
    }
}

impl Write for Response {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Output for Response {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}

/// Response streamed into a writer, e.g. a socket.
///
/// The header block is sent ahead of the first body byte (or on [`Stream::finish`]
/// for an empty body). Headers changed after that are not sent.
#[derive(Debug)]
pub struct Stream<W> {
    headers: Headers,
    inner: W,
    headers_sent: bool,
}

impl<W: Write> Stream<W> {
    /// Stream a response into this writer.
    pub fn new(inner: W) -> Self {
        Self {
            headers: Headers::new(),
            inner,
            headers_sent: false,
        }
    }

    /// The header block has been written to the underlying writer.
    pub fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    /// Send the headers if they haven't been yet and flush the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.send_headers()?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn send_headers(&mut self) -> io::Result<()> {
        if !self.headers_sent {
            let mut head = self.headers.to_bytes();
            head.extend_from_slice(b"\r\n");
            self.inner.write_all(&head)?;
            self.headers_sent = true;
        }

        Ok(())
    }
}

impl<W: Write> Write for Stream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.send_headers()?;
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> Output for Stream<W> {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}
