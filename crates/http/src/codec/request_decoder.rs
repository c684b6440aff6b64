//! HTTP request decoder module
//!
//! [`RequestDecoder`] turns the bytes of one connection into one [`Request`].
//! It runs on top of [`FramedRead`](tokio_util::codec::FramedRead), whose read
//! buffer is the lookahead window: the head is located inside the first
//! `limit` buffered bytes by [`HeadDecoder`], then, for `POST` requests that
//! declare a `Content-Length`, exactly that many body bytes are taken.
//!
//! # Example
//!
//! ```no_run
//! use nano_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("GET /hello HTTP/1.1\r\nHost: x\r\n\r\n");
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.path(), "/hello");
//! ```

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::head_decoder::HeadDecoder;
use crate::protocol::{ParseError, Request};

/// Default size of the lookahead window, in bytes.
pub const DEFAULT_LOOKAHEAD_LIMIT: usize = 4096;

/// The only method whose requests carry a body.
const BODY_METHOD: &str = "POST";

/// A decoder for a single HTTP request, head and body.
///
/// # State Machine
///
/// - `pending` is `None`: waiting for a complete head
/// - `pending` is `Some((request, length))`: head parsed, waiting until
///   `length` body bytes are buffered
#[derive(Debug)]
pub struct RequestDecoder {
    head_decoder: HeadDecoder,
    pending: Option<(Request, usize)>,
}

impl RequestDecoder {
    /// Creates a decoder with the default lookahead limit of 4096 bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder that searches at most `limit` bytes for the head delimiters.
    pub fn with_limit(limit: usize) -> Self {
        Self { head_decoder: HeadDecoder::new(limit), pending: None }
    }

    pub fn limit(&self) -> usize {
        self.head_decoder.limit()
    }

    fn decode_with(&mut self, src: &mut BytesMut, eof: bool) -> Result<Option<Request>, ParseError> {
        if self.pending.is_none() {
            let Some(request) = self.head_decoder.decode(src, eof)? else {
                return Ok(None);
            };

            match body_length(&request)? {
                Some(length) => self.pending = Some((request, length)),
                None => return Ok(Some(request)),
            }
        }

        let Some((_, length)) = &self.pending else {
            return Ok(None);
        };
        let length = *length;

        if src.len() < length {
            if eof {
                return Err(ParseError::invalid_body(format!("stream ended after {} of {} body bytes", src.len(), length)));
            }
            return Ok(None);
        }

        let Some((request, _)) = self.pending.take() else {
            return Ok(None);
        };
        // bytes past the declared length are left behind
        let body = src.split_to(length).freeze();
        trace!(body_size = length, "parsed request body");
        Ok(Some(request.with_body(Some(body))))
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::with_limit(DEFAULT_LOOKAHEAD_LIMIT)
    }
}

/// Number of body bytes to read: only `POST` with a `Content-Length` header has a body.
fn body_length(request: &Request) -> Result<Option<usize>, ParseError> {
    if request.method() != BODY_METHOD {
        return Ok(None);
    }

    request.content_length().transpose()
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode a request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: a complete request, including its body if any
    /// - `Ok(None)`: need more data to proceed
    /// - `Err(_)`: malformed framing or an unreadable body
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        self.decode_with(src, false)
    }

    /// Called once the peer stops sending.
    ///
    /// An empty buffer with no request in progress ends the stream quietly,
    /// anything else that is still incomplete becomes an error.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() && self.pending.is_none() {
            return Ok(None);
        }

        self.decode_with(src, true)
    }
}
