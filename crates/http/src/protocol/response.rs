//! Response framing helpers shared by handlers and the connection.
//!
//! Every helper writes one complete `HTTP/1.1` response frame to the sink and
//! flushes it before returning.

use bytes::{Bytes, BytesMut};
use http::header::CONNECTION;
use http::{HeaderValue, Response, StatusCode};
use tokio::io::AsyncWriteExt;
use tokio_util::codec::Encoder;

use crate::codec::ResponseEncoder;
use crate::handler::ResponseSink;
use crate::protocol::SendError;

const CLOSE: HeaderValue = HeaderValue::from_static("close");

/// Encodes `response` and writes it to `out`.
///
/// `Content-Length` is always set from the body, any value supplied by the
/// caller is replaced.
pub async fn write_response<B>(out: &mut ResponseSink<'_>, response: Response<B>) -> Result<(), SendError>
where
    B: Into<Bytes>,
{
    let mut buf = BytesMut::new();
    ResponseEncoder::new().encode(response, &mut buf)?;
    out.write_all(&buf).await?;
    out.flush().await?;
    Ok(())
}

/// Writes `400 Bad Request` with an empty body.
pub async fn write_bad_request(out: &mut ResponseSink<'_>) -> Result<(), SendError> {
    write_response(out, status_response(StatusCode::BAD_REQUEST)).await
}

/// Writes `404 Not Found` with an empty body.
pub async fn write_not_found(out: &mut ResponseSink<'_>) -> Result<(), SendError> {
    write_response(out, status_response(StatusCode::NOT_FOUND)).await
}

/// Writes `500 Internal Server Error` with an empty body.
pub async fn write_internal_error(out: &mut ResponseSink<'_>) -> Result<(), SendError> {
    write_response(out, status_response(StatusCode::INTERNAL_SERVER_ERROR)).await
}

/// An empty response carrying `status` and `Connection: close`.
pub fn status_response(status: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status;
    response.headers_mut().insert(CONNECTION, CLOSE);
    response
}
