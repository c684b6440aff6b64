//! Request line and header block parsing over a bounded lookahead window.
//!
//! The decoder never looks at more than `limit` buffered bytes. Both delimiter
//! searches run against the same snapshot `src[..limit]`, and nothing is
//! consumed until the whole head has been located:
//!
//! 1. find `CR LF` from offset 0, the bytes before it are the request line,
//!    which must split on single spaces into exactly three tokens
//! 2. find `CR LF CR LF` from the end of the request line, the bytes between
//!    the two delimiters are the header block, split on `CR LF`
//!
//! A missing delimiter means "wait for more input" while fewer than `limit`
//! bytes are buffered and the stream is open, and a Bad Request class error
//! otherwise.

use bytes::{Buf, BytesMut};
use tracing::trace;

use crate::ensure;
use crate::protocol::{ParseError, Request};
use crate::utils::find;

pub(crate) const REQUEST_LINE_DELIMITER: &[u8] = b"\r\n";
pub(crate) const HEADERS_DELIMITER: &[u8] = b"\r\n\r\n";

/// Parses the request line and header block into a body-less [`Request`].
#[derive(Debug, Clone, Copy)]
pub struct HeadDecoder {
    limit: usize,
}

impl HeadDecoder {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Tries to parse a head from the start of `src`.
    ///
    /// On success the head bytes, including the blank line, are removed from
    /// `src`, leaving it positioned at the first body byte. `eof` signals that
    /// no more input will arrive.
    pub fn decode(&self, src: &mut BytesMut, eof: bool) -> Result<Option<Request>, ParseError> {
        let window = &src[..src.len().min(self.limit)];
        // once the window is full or the stream is over, a missing delimiter is final
        let exhausted = eof || window.len() >= self.limit;

        // pass 1: request line
        let Some(line_end) = find(window, REQUEST_LINE_DELIMITER, 0) else {
            ensure!(!exhausted, ParseError::missing_request_line(self.limit));
            return Ok(None);
        };

        let request_line = String::from_utf8_lossy(&window[..line_end]);
        let tokens = request_line.split(' ').collect::<Vec<_>>();
        ensure!(tokens.len() == 3, ParseError::invalid_request_line(tokens.len()));

        // pass 2: header block, the terminator may directly follow the request line
        let Some(head_end) = find(window, HEADERS_DELIMITER, line_end) else {
            ensure!(!exhausted, ParseError::missing_header_terminator(self.limit));
            return Ok(None);
        };

        let headers_start = line_end + REQUEST_LINE_DELIMITER.len();
        let headers = if head_end > line_end {
            String::from_utf8_lossy(&window[headers_start..head_end]).split("\r\n").map(ToOwned::to_owned).collect()
        } else {
            Vec::new()
        };

        let request = Request::new(tokens[0], tokens[1], tokens[2], headers);
        let body_offset = head_end + HEADERS_DELIMITER.len();
        trace!(head_size = body_offset, header_count = request.headers().len(), "parsed request head");

        src.advance(body_offset);
        Ok(Some(request))
    }
}
