//! HTTP connection handling module
//!
//! - [`HttpConnection`]: runs the lifecycle of one accepted connection:
//!   parse a single request, hand it to a handler, close the output stream.
//!   There is no keep-alive, the connection always closes after one exchange.

mod http_connection;

pub use http_connection::HttpConnection;
