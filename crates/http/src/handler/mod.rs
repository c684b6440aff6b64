//! The handler capability: user code answering one parsed request.
//!
//! A [`Handler`] receives the [`Request`] and the connection's output sink and
//! must write one complete response frame before returning. Handlers are
//! shared across connections, so they are `Send + Sync`.
//!
//! [`make_handler`] adapts an async function returning an `http::Response`
//! into a handler that encodes the response for you.

use std::error::Error;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::Response;
use tokio::io::AsyncWrite;
use tracing::error;

use crate::protocol::{write_internal_error, write_response, Request, SendError};

/// The output byte stream of a connection, as seen by handlers.
pub type ResponseSink<'a> = dyn AsyncWrite + Send + Unpin + 'a;

#[async_trait]
pub trait Handler: Send + Sync {
    /// Writes the response for `request` to `out`.
    ///
    /// An error means the response could not be written, the connection is
    /// then dropped.
    async fn handle(&self, request: &Request, out: &mut ResponseSink<'_>) -> Result<(), SendError>;
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn handle(&self, request: &Request, out: &mut ResponseSink<'_>) -> Result<(), SendError> {
        (**self).handle(request, out).await
    }
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Box<H> {
    async fn handle(&self, request: &Request, out: &mut ResponseSink<'_>) -> Result<(), SendError> {
        (**self).handle(request, out).await
    }
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<F, Fut, RespBody, Err> Handler for HandlerFn<F>
where
    F: Fn(&Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response<RespBody>, Err>> + Send + 'static,
    RespBody: Into<Bytes> + Send + 'static,
    Err: Into<Box<dyn Error + Send + Sync>> + Send + 'static,
{
    async fn handle(&self, request: &Request, out: &mut ResponseSink<'_>) -> Result<(), SendError> {
        match (self.f)(request).await {
            Ok(response) => write_response(out, response).await,
            Err(e) => {
                let cause = e.into();
                error!(path = request.path(), cause = %cause, "handle response error");
                write_internal_error(out).await
            }
        }
    }
}

/// Wraps `f` into a [`Handler`].
///
/// The future returned by `f` cannot borrow the request; copy what it needs
/// out of the request before the `async` block.
pub fn make_handler<F, Fut, RespBody, Err>(f: F) -> HandlerFn<F>
where
    F: Fn(&Request) -> Fut,
    Fut: Future<Output = Result<Response<RespBody>, Err>>,
    RespBody: Into<Bytes>,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    HandlerFn { f }
}
