//! Serializes an `http::Response` into an HTTP/1.x response frame.

use std::io;
use std::io::Write;

use bytes::{BufMut, Bytes, BytesMut};
use http::{header, HeaderValue, Response, Version};
use tokio_util::codec::Encoder;
use tracing::error;

use crate::protocol::SendError;

/// Initial buffer size reserved for the status line and headers
const INIT_HEADER_SIZE: usize = 512;

/// Encoder for complete responses: status line, headers, blank line, body.
///
/// `Content-Length` always reflects the body that is actually written.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl<B: Into<Bytes>> Encoder<Response<B>> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response<B>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (mut parts, body) = item.into_parts();
        let body: Bytes = body.into();

        let version = match parts.version {
            Version::HTTP_10 => "HTTP/1.0",
            Version::HTTP_11 => "HTTP/1.1",
            v => {
                error!(http_version = ?v, "unsupported http version");
                return Err(SendError::invalid_response(format!("unsupported http version {v:?}")));
            }
        };

        dst.reserve(INIT_HEADER_SIZE + body.len());
        write!(FastWrite(dst), "{} {} {}\r\n", version, parts.status.as_str(), parts.status.canonical_reason().unwrap_or(""))?;

        match parts.headers.get_mut(header::CONTENT_LENGTH) {
            Some(value) => *value = HeaderValue::from(body.len()),
            None => {
                parts.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
            }
        }

        for (header_name, header_value) in &parts.headers {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        dst.put_slice(&body);
        Ok(())
    }
}

/// Writer adapter over `BytesMut`, the space is reserved up front.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn encode<B: Into<Bytes>>(response: Response<B>) -> Result<BytesMut, SendError> {
        let mut dst = BytesMut::new();
        ResponseEncoder.encode(response, &mut dst)?;
        Ok(dst)
    }

    #[test]
    fn encodes_status_headers_and_body() {
        let response =
            Response::builder().status(StatusCode::CREATED).header(header::CONTENT_TYPE, "text/plain").body("done").unwrap();

        let dst = encode(response).unwrap();
        assert_eq!(&dst[..], b"HTTP/1.1 201 Created\r\ncontent-type: text/plain\r\ncontent-length: 4\r\n\r\ndone");
    }

    #[test]
    fn overrides_wrong_content_length() {
        let response = Response::builder().header(header::CONTENT_LENGTH, 100).body(Bytes::from_static(b"abc")).unwrap();

        let dst = encode(response).unwrap();
        assert_eq!(&dst[..], b"HTTP/1.1 200 OK\r\ncontent-length: 3\r\n\r\nabc");
    }

    #[test]
    fn supports_http_10() {
        let response = Response::builder().version(Version::HTTP_10).status(StatusCode::NO_CONTENT).body("").unwrap();

        let dst = encode(response).unwrap();
        assert_eq!(&dst[..], b"HTTP/1.0 204 No Content\r\ncontent-length: 0\r\n\r\n");
    }

    #[test]
    fn rejects_http_2() {
        let response = Response::builder().version(Version::HTTP_2).body("").unwrap();
        assert!(matches!(encode(response), Err(SendError::InvalidResponse { .. })));
    }
}
