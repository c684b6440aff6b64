//! Core HTTP protocol types.
//!
//! - **Request** ([`request`]): the immutable [`Request`] value produced by the parser
//! - **Response framing** ([`response`]): helpers writing complete response frames,
//!   including the `400` and `404` answers used by the connection and the router
//! - **Error Handling** ([`error`]):
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: Request parsing errors
//!   - [`SendError`]: Response sending errors

mod request;
pub use request::Request;

mod response;
pub use response::status_response;
pub use response::write_bad_request;
pub use response::write_internal_error;
pub use response::write_not_found;
pub use response::write_response;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
