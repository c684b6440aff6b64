//! HTTP codec module for decoding requests and encoding responses
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: decodes one request from a connection, head and body
//!   - [`HeadDecoder`]: locates the request line and header block inside the
//!     bounded lookahead window
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: encodes an `http::Response` into a complete frame
//!
//! # Example
//!
//! ```no_run
//! use nano_http::codec::{RequestDecoder, ResponseEncoder};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! // Decode incoming request
//! let mut decoder = RequestDecoder::with_limit(1024);
//! let mut request_buffer = BytesMut::from("GET / HTTP/1.1\r\n\r\n");
//! let request = decoder.decode(&mut request_buffer);
//!
//! // Encode outgoing response
//! let mut response_buffer = BytesMut::new();
//! ResponseEncoder::new().encode(http::Response::new("hi"), &mut response_buffer).unwrap();
//! ```

mod head_decoder;
mod request_decoder;
mod response_encoder;

pub use head_decoder::HeadDecoder;
pub use request_decoder::DEFAULT_LOOKAHEAD_LIMIT;
pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
