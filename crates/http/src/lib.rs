//! A minimal HTTP/1.x request parser and single-request connection
//!
//! This crate carves one request out of a raw connection byte stream using a
//! bounded lookahead window and hands it to a [`handler::Handler`]. Nothing
//! from a general purpose HTTP stack is used for parsing: the request line and
//! header block are found by plain delimiter search, headers stay raw
//! `Name: value` lines, and only `POST` requests carry a body.
//!
//! # Example
//!
//! ```no_run
//! use http::Response;
//! use std::convert::Infallible;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//! use nano_http::connection::HttpConnection;
//! use nano_http::handler::make_handler;
//! use nano_http::protocol::Request;
//!
//! #[tokio::main]
//! async fn main() {
//!     info!(port = 8080, "start listening");
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = std::sync::Arc::new(make_handler(|request: &Request| {
//!         let path = request.path().to_owned();
//!         async move { Ok::<_, Infallible>(Response::new(format!("hello {path}"))) }
//!     }));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             if let Err(e) = connection.process(handler.as_ref()).await {
//!                 error!("service has error, cause {}, connection shutdown", e);
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: the request decoder (request line, headers, body) and response encoder
//! - [`protocol`]: the [`protocol::Request`] value, response framing helpers and errors
//! - [`handler`]: the handler capability and [`handler::make_handler`]
//! - [`connection`]: the one-request connection lifecycle
//!
//! # Limitations
//!
//! - One request per connection, no keep-alive or pipelining
//! - No chunked transfer encoding, bodies are read by `Content-Length` only
//! - Request line and header block must fit in the lookahead window (4096 bytes by default)
//! - No TLS

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
