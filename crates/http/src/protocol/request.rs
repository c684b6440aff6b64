//! The parsed HTTP request value.
//!
//! A [`Request`] is built once per connection by the
//! [`RequestDecoder`](crate::codec::RequestDecoder) and handed to a
//! [`Handler`](crate::handler::Handler) by reference. Header lines are kept as
//! raw `Name: value` strings in wire order; consumers inspect them with
//! prefix lookups instead of a structured header map.

use std::borrow::Cow;

use bytes::Bytes;

use crate::protocol::ParseError;

const CONTENT_LENGTH: &str = "Content-Length";

/// An immutable HTTP/1.x request.
///
/// `body` is `Some` only for `POST` requests that carried a `Content-Length`
/// header, in which case it holds exactly that many bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    path: String,
    version: String,
    headers: Vec<String>,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a request without a body.
    pub fn new(method: impl Into<String>, path: impl Into<String>, version: impl Into<String>, headers: Vec<String>) -> Self {
        Self { method: method.into(), path: path.into(), version: version.into(), headers, body: None }
    }

    /// Attaches a body, consuming the request.
    pub fn with_body(self, body: Option<Bytes>) -> Self {
        Self { body, ..self }
    }

    /// The first token of the request line, verbatim.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The second token of the request line, verbatim (no decoding, no normalization).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The third token of the request line. It is not checked against known versions.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Raw header lines in wire order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Lossy UTF-8 view of the body.
    pub fn body_text(&self) -> Option<Cow<'_, str>> {
        self.body.as_ref().map(|body| String::from_utf8_lossy(body))
    }

    /// Finds the first header line starting with `name` and returns its value.
    ///
    /// The match is a case-sensitive prefix match on the whole line, so
    /// `header("Content-Length")` also matches a `Content-Length-Foo` line.
    /// The value is the text after the first space of the line, trimmed. A
    /// line without a space yields what follows `name` and the `:` separator.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|line| line.starts_with(name)).map(|line| match line.find(' ') {
            Some(space) => line[space..].trim(),
            None => line[name.len()..].trim_start_matches(':').trim(),
        })
    }

    /// Parses the `Content-Length` header, if one is present.
    ///
    /// A present but non-numeric value is an error, never silently ignored.
    pub fn content_length(&self) -> Option<Result<usize, ParseError>> {
        self.header(CONTENT_LENGTH).map(|value| {
            value.parse::<usize>().map_err(|e| ParseError::invalid_content_length(format!("value {value:?} is not a length: {e}")))
        })
    }
}
