use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufWriter};
use tokio_util::codec::FramedRead;
use tracing::{debug, info, warn};

use crate::codec::{RequestDecoder, DEFAULT_LOOKAHEAD_LIMIT};
use crate::handler::Handler;
use crate::protocol::{write_bad_request, HttpError, SendError};

/// One HTTP connection serving exactly one request.
///
/// `HttpConnection` owns both halves of the transport:
/// - the read half behind a [`FramedRead`] whose buffer is the lookahead window
/// - the write half behind a [`BufWriter`], flushed and shut down on every exit path
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    writer: BufWriter<W>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Send + Unpin,
    W: AsyncWrite + Send + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_limit(reader, writer, DEFAULT_LOOKAHEAD_LIMIT)
    }

    /// Creates a connection whose parser looks at most `limit` bytes ahead.
    pub fn with_limit(reader: R, writer: W, limit: usize) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::with_limit(limit), limit),
            writer: BufWriter::new(writer),
        }
    }

    /// Reads one request, hands it to `handler`, then closes the output stream.
    ///
    /// - malformed framing is answered with `400 Bad Request` and returned as an error
    /// - body and transport failures are returned without writing anything
    /// - a peer that closes without sending anything is not an error
    pub async fn process<H>(mut self, handler: &H) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        let result = self.do_process(handler).await;

        // BufWriter flushes its buffer before shutting the inner writer down
        if let Err(e) = self.writer.shutdown().await {
            debug!(cause = %e, "failed to shutdown connection writer");
            if result.is_ok() {
                return Err(SendError::io(e).into());
            }
        }

        result
    }

    async fn do_process<H>(&mut self, handler: &H) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        match self.framed_read.next().await {
            Some(Ok(request)) => {
                debug!(method = request.method(), path = request.path(), "receive request");
                handler.handle(&request, &mut self.writer).await?;
                Ok(())
            }

            Some(Err(e)) if e.is_bad_request() => {
                warn!(cause = %e, "malformed request, sending bad request");
                write_bad_request(&mut self.writer).await?;
                Err(e.into())
            }

            Some(Err(e)) => Err(e.into()),

            None => {
                info!("cant read any request, break this connection down");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{make_handler, ResponseSink};
    use crate::protocol::{ParseError, Request};
    use async_trait::async_trait;
    use http::Response;
    use std::convert::Infallible;
    use std::sync::Mutex;

    const OK: &[u8] = b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\nok";

    /// Records every request it sees.
    #[derive(Default)]
    struct Recorder {
        requests: Mutex<Vec<Request>>,
    }

    #[async_trait]
    impl Handler for Recorder {
        async fn handle(&self, request: &Request, out: &mut ResponseSink<'_>) -> Result<(), SendError> {
            self.requests.lock().unwrap().push(request.clone());
            out.write_all(OK).await?;
            Ok(())
        }
    }

    async fn serve(input: &[u8], limit: usize) -> (Result<(), HttpError>, Vec<u8>, Vec<Request>) {
        let recorder = Recorder::default();
        let mut out = Vec::new();

        let result = HttpConnection::with_limit(input, &mut out, limit).process(&recorder).await;

        let requests = recorder.requests.into_inner().unwrap();
        (result, out, requests)
    }

    #[tokio::test]
    async fn serves_one_get() {
        let (result, out, requests) = serve(b"GET /hello HTTP/1.1\r\nHost: x\r\n\r\n", 4096).await;

        result.unwrap();
        assert_eq!(out, OK);
        assert_eq!(requests, [Request::new("GET", "/hello", "HTTP/1.1", vec!["Host: x".to_string()])]);
    }

    #[tokio::test]
    async fn serves_one_post_with_body() {
        let (result, _out, requests) = serve(b"POST /echo HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello", 4096).await;

        result.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body_text().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn only_first_request_is_served() {
        let input = b"GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\n\r\n";
        let (result, out, requests) = serve(input, 4096).await;

        result.unwrap();
        assert_eq!(out, OK);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path(), "/a");
    }

    #[tokio::test]
    async fn missing_delimiter_answers_bad_request() {
        let input = vec![b'a'; 64];
        let (result, out, requests) = serve(&input, 64).await;

        assert!(matches!(result, Err(HttpError::RequestError { source: ParseError::MissingRequestLine { limit: 64 } })));
        assert!(out.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn short_garbage_answers_bad_request() {
        let (result, out, requests) = serve(b"garbage", 4096).await;

        assert!(result.is_err());
        assert!(out.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn wrong_token_count_answers_bad_request() {
        let (result, out, requests) = serve(b"GET /hello\r\n\r\n", 4096).await;

        assert!(matches!(result, Err(HttpError::RequestError { source: ParseError::InvalidRequestLine { tokens: 2 } })));
        assert!(out.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn truncated_body_aborts_without_response() {
        let (result, out, requests) = serve(b"POST /echo HTTP/1.1\r\nContent-Length: 50\r\n\r\nhello", 4096).await;

        assert!(matches!(result, Err(HttpError::RequestError { source: ParseError::InvalidBody { .. } })));
        assert!(out.is_empty());
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn bad_content_length_aborts_without_response() {
        let (result, out, requests) = serve(b"POST /echo HTTP/1.1\r\nContent-Length: x\r\n\r\nhello", 4096).await;

        assert!(matches!(result, Err(HttpError::RequestError { source: ParseError::InvalidContentLength { .. } })));
        assert!(out.is_empty());
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn empty_stream_is_not_an_error() {
        let (result, out, requests) = serve(b"", 4096).await;

        result.unwrap();
        assert!(out.is_empty());
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn request_split_across_reads() {
        let (client, server) = tokio::io::duplex(8);
        let (reader, writer) = tokio::io::split(server);
        let handler = make_handler(|request: &Request| {
            let path = request.path().to_owned();
            async move { Ok::<_, Infallible>(Response::new(path)) }
        });

        let serving = tokio::spawn(async move { HttpConnection::new(reader, writer).process(&handler).await });

        let (mut client_reader, mut client_writer) = tokio::io::split(client);
        let reading = tokio::spawn(async move {
            let mut response = Vec::new();
            tokio::io::AsyncReadExt::read_to_end(&mut client_reader, &mut response).await.unwrap();
            response
        });

        for piece in ["GET /sl", "ow HTTP/1.1\r", "\nHost: x\r\n", "\r\n"] {
            client_writer.write_all(piece.as_bytes()).await.unwrap();
        }

        serving.await.unwrap().unwrap();
        assert_eq!(reading.await.unwrap(), b"HTTP/1.1 200 OK\r\ncontent-length: 5\r\n\r\n/slow");
    }
}
