use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// Failures raised while carving a request out of the input stream.
///
/// The variants fall into two classes, see [`ParseError::is_bad_request`]:
/// malformed framing, which is answered with `400 Bad Request`, and body or
/// transport failures, which abort the connection without any response.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no request line delimiter within the first {limit} bytes")]
    MissingRequestLine { limit: usize },

    #[error("request line has {tokens} space separated tokens, expected 3")]
    InvalidRequestLine { tokens: usize },

    #[error("no header block terminator within the first {limit} bytes")]
    MissingHeaderTerminator { limit: usize },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn missing_request_line(limit: usize) -> Self {
        Self::MissingRequestLine { limit }
    }

    pub fn invalid_request_line(tokens: usize) -> Self {
        Self::InvalidRequestLine { tokens }
    }

    pub fn missing_header_terminator(limit: usize) -> Self {
        Self::MissingHeaderTerminator { limit }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn invalid_body<S: ToString>(str: S) -> Self {
        Self::InvalidBody { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Returns true when the client should be told `400 Bad Request`.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::MissingRequestLine { .. } | Self::InvalidRequestLine { .. } | Self::MissingHeaderTerminator { .. })
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn invalid_response<S: ToString>(str: S) -> Self {
        Self::InvalidResponse { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_errors_are_bad_requests() {
        assert!(ParseError::missing_request_line(4096).is_bad_request());
        assert!(ParseError::invalid_request_line(2).is_bad_request());
        assert!(ParseError::missing_header_terminator(4096).is_bad_request());
    }

    #[test]
    fn body_and_io_errors_are_fatal() {
        assert!(!ParseError::invalid_content_length("abc").is_bad_request());
        assert!(!ParseError::invalid_body("eof").is_bad_request());
        assert!(!ParseError::io(io::Error::from(io::ErrorKind::ConnectionReset)).is_bad_request());
    }

    #[test]
    fn display_mentions_limit() {
        let message = ParseError::missing_header_terminator(64).to_string();
        assert_eq!(message, "no header block terminator within the first 64 bytes");
    }
}
